use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Effective permission map: `"module.action"` -> level.
///
/// Absent entries mean no access. This is the single canonical shape for
/// permissions inside the core; nothing else is allowed to cross a module
/// boundary.
pub type PermissionMap = HashMap<String, i32>;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user id)
    pub sub: String,

    /// Role names held by the user at issuance
    pub roles: Vec<String>,

    /// True when any held role is flagged super-admin
    pub super_admin: bool,

    /// Permission snapshot at issuance; stale until the next refresh
    pub permissions: PermissionMap,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Claims carried by a refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject (user id)
    pub sub: String,

    /// Unique token id; the database row, not this id, is the authority
    /// on revocation state
    pub jti: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}
