use std::sync::Arc;

use crate::errors::AuthError;
use crate::services::TokenCodec;
use crate::types::internal::AccessClaims;

/// Authenticates bearer tokens and gates operations on permission levels.
///
/// Checks run entirely against the claims snapshot baked into the access
/// token at issuance; no database round trip. Grants revoked mid-session
/// therefore remain usable until the token expires or is refreshed.
pub struct AuthGate {
    codec: Arc<TokenCodec>,
}

impl AuthGate {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Validate a bearer access token and return its claims
    pub fn authenticate(&self, token: &str) -> Result<AccessClaims, AuthError> {
        self.codec.verify_access(token)
    }

    /// Require at least `required` on `module.action`.
    ///
    /// Super-admin claims bypass the lookup entirely. Otherwise a missing
    /// entry means level 0, so anything above 0 is denied.
    pub fn authorize(
        claims: &AccessClaims,
        module: &str,
        action: &str,
        required: i32,
    ) -> Result<(), AuthError> {
        if claims.super_admin {
            return Ok(());
        }

        let key = format!("{}.{}", module, action);
        let level = claims.permissions.get(&key).copied().unwrap_or(0);

        if level >= required {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                module: module.to_owned(),
                action: action.to_owned(),
                required,
            })
        }
    }
}
