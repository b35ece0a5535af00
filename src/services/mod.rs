mod auth_gate;
mod permission_resolver;
mod session_manager;
mod token_codec;

pub use auth_gate::AuthGate;
pub use permission_resolver::PermissionResolver;
pub use session_manager::SessionManager;
pub use token_codec::TokenCodec;
