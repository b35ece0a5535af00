use std::fmt;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::Sha256;
use uuid::Uuid;

use crate::config::{AuthSettings, SecretManager};
use crate::errors::AuthError;
use crate::types::internal::{AccessClaims, PermissionMap, RefreshClaims};

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies the two token categories.
///
/// Access and refresh tokens are signed with separate secrets; a token from
/// one category never verifies against the other. Refresh tokens are
/// additionally hashed with HMAC-SHA256 before storage so the database never
/// holds a usable token.
pub struct TokenCodec {
    secret_manager: Arc<SecretManager>,
    settings: AuthSettings,
}

impl TokenCodec {
    pub fn new(secret_manager: Arc<SecretManager>, settings: AuthSettings) -> Self {
        Self {
            secret_manager,
            settings,
        }
    }

    /// Access token lifetime in seconds, exposed for the login response
    pub fn access_token_seconds(&self) -> i64 {
        self.settings.access_token_seconds()
    }

    /// Generate an access token carrying the user's authorization snapshot
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `roles` - Role names at issuance
    /// * `super_admin` - Whether any assigned role is a super-admin role
    /// * `permissions` - Resolved module.action -> level map at issuance
    /// * `now` - Current Unix timestamp
    ///
    /// # Returns
    /// * `Result<String, AuthError>` - The encoded JWT or an error
    pub fn issue_access_token(
        &self,
        user_id: &str,
        roles: Vec<String>,
        super_admin: bool,
        permissions: PermissionMap,
        now: i64,
    ) -> Result<String, AuthError> {
        let claims = AccessClaims {
            sub: user_id.to_owned(),
            roles,
            super_admin,
            permissions,
            exp: now + self.settings.access_token_seconds(),
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.access_token_secret().as_bytes()),
        )
        .map_err(|e| AuthError::TokenGeneration(format!("Failed to generate access token: {}", e)))
    }

    /// Generate a refresh token for the given user
    ///
    /// # Returns
    /// * `Result<(String, String), AuthError>` - Tuple of (encoded JWT, token id)
    pub fn issue_refresh_token(&self, user_id: &str, now: i64) -> Result<(String, String), AuthError> {
        let jti = Uuid::new_v4().to_string();

        let claims = RefreshClaims {
            sub: user_id.to_owned(),
            jti: jti.clone(),
            exp: now + self.settings.refresh_token_seconds(),
            iat: now,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.refresh_token_secret().as_bytes()),
        )
        .map_err(|e| {
            AuthError::TokenGeneration(format!("Failed to generate refresh token: {}", e))
        })?;

        Ok((token, jti))
    }

    /// Validate an access token and return its claims
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.access_token_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| {
            if e.to_string().contains("ExpiredSignature") {
                AuthError::ExpiredToken("access".to_string())
            } else {
                AuthError::invalid_token("access", "invalid signature or malformed")
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validate a refresh token's signature and expiry and return its claims.
    ///
    /// Signature validity alone does not make the token usable; the caller
    /// must still consume the matching database row.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.refresh_token_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| {
            if e.to_string().contains("ExpiredSignature") {
                AuthError::ExpiredToken("refresh".to_string())
            } else {
                AuthError::invalid_token("refresh", "invalid signature or malformed")
            }
        })?;

        Ok(token_data.claims)
    }

    /// Hash a refresh token for storage and lookup
    ///
    /// # Returns
    /// * `String` - The hex-encoded HMAC-SHA256 hash
    pub fn refresh_lookup_hash(&self, token: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(self.secret_manager.refresh_token_secret().as_bytes())
                .expect("HMAC can take key of any size");
        mac.update(token.as_bytes());
        format!("{:x}", mac.finalize().into_bytes())
    }

    /// Expiration timestamp for a refresh token issued at `now`
    pub fn refresh_expiration(&self, now: i64) -> i64 {
        now + self.settings.refresh_token_seconds()
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret_manager", &"<redacted>")
            .field("access_token_minutes", &self.settings.access_token_minutes)
            .field("refresh_token_days", &self.settings.refresh_token_days)
            .finish()
    }
}

impl fmt::Display for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenCodec {{ access: {}min, refresh: {}days }}",
            self.settings.access_token_minutes, self.settings.refresh_token_days
        )
    }
}
