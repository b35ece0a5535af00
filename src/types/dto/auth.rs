use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::{role, user};
use crate::types::internal::auth::PermissionMap;

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name for authentication
    pub login: String,

    /// Password for authentication
    pub password: String,
}

/// Sanitized user projection; never carries the password hash
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id (UUID)
    pub id: String,

    /// Unique login name
    pub login: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Whether the account may authenticate
    pub is_active: bool,

    /// Last successful login (Unix timestamp)
    pub last_login: Option<i64>,

    /// Roles assigned to the user
    pub roles: Vec<RoleSummary>,

    /// Effective permission map ("module.action" -> level)
    pub permissions: PermissionMap,
}

/// Role projection embedded in user profiles
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct RoleSummary {
    /// Role id (UUID)
    pub id: String,

    /// Unique role name
    pub name: String,

    /// Whether this role bypasses permission checks
    pub is_super_admin: bool,
}

impl UserProfile {
    /// Build a profile from the persisted user plus resolved roles and
    /// permissions, dropping the password hash.
    pub fn from_parts(
        user: user::Model,
        roles: Vec<role::Model>,
        permissions: PermissionMap,
    ) -> Self {
        Self {
            id: user.id,
            login: user.login,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            is_active: user.is_active,
            last_login: user.last_login,
            roles: roles
                .into_iter()
                .map(|r| RoleSummary {
                    id: r.id,
                    name: r.name,
                    is_super_admin: r.is_super_admin,
                })
                .collect(),
            permissions,
        }
    }
}

/// Response model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Sanitized user profile with roles and effective permissions
    pub user: UserProfile,

    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,
}

/// Response model for token refresh
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,
}

/// Response model for logout
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Success message
    pub message: String,
}
