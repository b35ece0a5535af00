use crate::types::db::{role, user};
use crate::types::internal::PermissionMap;

/// Everything produced by a successful login.
///
/// The plaintext refresh token only ever travels from here to the cookie;
/// it is never persisted or logged.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: user::Model,
    pub roles: Vec<role::Model>,
    pub permissions: PermissionMap,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// New token pair produced by a successful rotation.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}
