use thiserror::Error;

/// Errors raised by the authentication/authorization core.
///
/// All variants are terminal for the calling operation; nothing in the core
/// retries. Database errors propagate unchanged so the boundary can map them
/// to a generic failure without leaking internals.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown login, inactive account, or wrong password. Deliberately a
    /// single variant so callers cannot reveal which factor failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {token_type} - {reason}")]
    InvalidToken { token_type: String, reason: String },

    #[error("Expired token: {0}")]
    ExpiredToken(String),

    /// Syntactically valid refresh token that is no longer the active one
    /// for its lineage: already rotated, explicitly revoked, or past its
    /// row-level expiry. Always fails closed.
    #[error("Refresh token revoked or expired")]
    RevokedOrExpired,

    #[error("Insufficient permission for {module}.{action} (requires level {required})")]
    Forbidden {
        module: String,
        action: String,
        required: i32,
    },

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Password hashing failed: {0}")]
    PasswordHashingFailed(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AuthError {
    pub fn invalid_token(token_type: &str, reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            token_type: token_type.to_string(),
            reason: reason.into(),
        }
    }
}
