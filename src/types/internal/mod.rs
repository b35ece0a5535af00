pub mod auth;
pub mod session;

pub use auth::{AccessClaims, PermissionMap, RefreshClaims};
pub use session::{LoginOutcome, RefreshOutcome};
