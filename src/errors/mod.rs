// Errors layer - error type definitions
pub mod api;
pub mod auth;

// Re-exports for convenience
pub use api::AuthApiError;
pub use auth::AuthError;
