use poem_openapi::{payload::Json, ApiResponse};

use crate::errors::AuthError;
use crate::types::dto::common::ErrorResponse;

/// HTTP-facing error responses for authentication endpoints.
///
/// Expired and malformed tokens carry distinct messages for debuggability,
/// but both map to 401 so clients treat them identically: re-authenticate.
#[derive(ApiResponse, Debug)]
pub enum AuthApiError {
    /// Invalid login or password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Invalid, malformed, or expired token
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// Refresh token already rotated, revoked, or expired
    #[oai(status = 401)]
    RevokedOrExpired(Json<ErrorResponse>),

    /// Authenticated but insufficient permission level
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// User id no longer resolves
    #[oai(status = 404)]
    UserNotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthApiError {
    fn body(error: &str, message: impl Into<String>) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
        })
    }
}

impl From<AuthError> for AuthApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials(Self::body(
                "invalid_credentials",
                "Invalid login or password",
            )),
            AuthError::InvalidToken { token_type, reason } => Self::InvalidToken(Self::body(
                "invalid_token",
                format!("Invalid {} token: {}", token_type, reason),
            )),
            AuthError::ExpiredToken(token_type) => Self::InvalidToken(Self::body(
                "expired_token",
                format!("Expired {} token", token_type),
            )),
            AuthError::RevokedOrExpired => Self::RevokedOrExpired(Self::body(
                "revoked_or_expired",
                "Refresh token is no longer valid",
            )),
            AuthError::Forbidden {
                module,
                action,
                required,
            } => Self::Forbidden(Self::body(
                "forbidden",
                format!(
                    "Insufficient permission for {}.{} (requires level {})",
                    module, action, required
                ),
            )),
            AuthError::UserNotFound(_) => {
                Self::UserNotFound(Self::body("user_not_found", "User not found"))
            }
            AuthError::Database(e) => {
                tracing::error!("Database error surfaced at API boundary: {}", e);
                Self::InternalError(Self::body("internal_error", "Internal server error"))
            }
            AuthError::TokenGeneration(e) | AuthError::PasswordHashingFailed(e) => {
                tracing::error!("Crypto error surfaced at API boundary: {}", e);
                Self::InternalError(Self::body("internal_error", "Internal server error"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_never_reveals_which_factor_failed() {
        let api_err: AuthApiError = AuthError::InvalidCredentials.into();
        match api_err {
            AuthApiError::InvalidCredentials(json) => {
                assert!(!json.0.message.contains("password"));
                assert!(!json.0.message.to_lowercase().contains("inactive"));
                assert_eq!(json.0.error, "invalid_credentials");
            }
            _ => panic!("Expected InvalidCredentials"),
        }
    }

    #[test]
    fn expired_and_malformed_tokens_have_distinct_messages() {
        let expired: AuthApiError = AuthError::ExpiredToken("access".to_string()).into();
        let malformed: AuthApiError =
            AuthError::invalid_token("access", "invalid signature").into();

        let expired_msg = match expired {
            AuthApiError::InvalidToken(json) => json.0,
            _ => panic!("Expected InvalidToken"),
        };
        let malformed_msg = match malformed {
            AuthApiError::InvalidToken(json) => json.0,
            _ => panic!("Expected InvalidToken"),
        };

        assert_eq!(expired_msg.error, "expired_token");
        assert_eq!(malformed_msg.error, "invalid_token");
        assert_ne!(expired_msg.message, malformed_msg.message);
    }

    #[test]
    fn database_errors_map_to_generic_internal_error() {
        let api_err: AuthApiError =
            AuthError::Database(sea_orm::DbErr::Custom("connection reset".to_string())).into();
        match api_err {
            AuthApiError::InternalError(json) => {
                assert_eq!(json.0.message, "Internal server error");
                assert!(!json.0.message.contains("connection reset"));
            }
            _ => panic!("Expected InternalError"),
        }
    }
}
