use std::sync::Arc;

use chrono::Utc;

use crate::errors::AuthError;
use crate::services::{PermissionResolver, TokenCodec};
use crate::stores::CredentialStore;
use crate::types::db::{role, user};
use crate::types::internal::{LoginOutcome, PermissionMap, RefreshOutcome};

/// Orchestrates the session lifecycle: login, refresh rotation, and logout.
///
/// Every issued refresh token is recorded (hashed) before the plaintext is
/// released to the caller, so there is no window where a token circulates
/// without a matching row.
pub struct SessionManager {
    store: Arc<CredentialStore>,
    codec: Arc<TokenCodec>,
    resolver: Arc<PermissionResolver>,
}

impl SessionManager {
    pub fn new(
        store: Arc<CredentialStore>,
        codec: Arc<TokenCodec>,
        resolver: Arc<PermissionResolver>,
    ) -> Self {
        Self {
            store,
            codec,
            resolver,
        }
    }

    /// Authenticate a user and establish a session
    ///
    /// # Arguments
    /// * `login` - Login name
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// * `Ok(LoginOutcome)` - Profile data plus a fresh token pair
    /// * `Err(AuthError::InvalidCredentials)` - Any verification failure
    pub async fn login(&self, login: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let mut user = self.store.verify_credentials(login, password).await?;

        let (roles, permissions) = self.resolver.resolve_with_roles(&user.id).await?;
        let now = Utc::now().timestamp();

        let (access_token, refresh_token) = self
            .issue_token_pair(&user.id, &roles, permissions.clone(), now)
            .await?;

        self.store.touch_last_login(&user.id, now).await?;
        user.last_login = Some(now);
        user.last_activity = Some(now);

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user,
            roles,
            permissions,
            access_token,
            refresh_token,
            expires_in: self.codec.access_token_seconds(),
        })
    }

    /// Rotate a refresh token, returning a new token pair.
    ///
    /// The presented token is consumed atomically before anything new is
    /// issued; a token that loses the race (or was already rotated, revoked,
    /// or expired) gets `RevokedOrExpired` and nothing else happens. The new
    /// access token carries freshly re-resolved roles and permissions, so
    /// authorization changes take effect here at the latest.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, AuthError> {
        let claims = self.codec.verify_refresh(refresh_token)?;
        let token_hash = self.codec.refresh_lookup_hash(refresh_token);
        let now = Utc::now().timestamp();

        self.store
            .consume_refresh_token(&token_hash, &claims.sub, now)
            .await?;

        let user = self
            .store
            .find_user_by_id(&claims.sub)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(claims.sub.clone()))?;

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Refresh attempt by inactive user");
            return Err(AuthError::RevokedOrExpired);
        }

        let (roles, permissions) = self.resolver.resolve_with_roles(&user.id).await?;
        let (access_token, new_refresh_token) = self
            .issue_token_pair(&user.id, &roles, permissions, now)
            .await?;

        self.store.touch_last_activity(&user.id, now).await?;

        tracing::debug!(user_id = %user.id, "Refresh token rotated");

        Ok(RefreshOutcome {
            access_token,
            refresh_token: new_refresh_token,
            expires_in: self.codec.access_token_seconds(),
        })
    }

    /// End a session by revoking the presented refresh token.
    ///
    /// Always succeeds. A missing, malformed, or already-revoked token still
    /// results in a logged-out client, so there is nothing useful to report
    /// and nothing for an attacker to probe.
    pub async fn logout(&self, refresh_token: Option<&str>) {
        let Some(token) = refresh_token else {
            return;
        };
        if token.is_empty() {
            return;
        }

        let token_hash = self.codec.refresh_lookup_hash(token);
        if let Err(e) = self.store.revoke_refresh_token(&token_hash).await {
            tracing::error!("Failed to revoke refresh token on logout: {}", e);
        }

        // Verification failure is swallowed; the activity touch only happens
        // for tokens we can still attribute to a user
        if let Ok(claims) = self.codec.verify_refresh(token) {
            let now = Utc::now().timestamp();
            if let Err(e) = self.store.touch_last_activity(&claims.sub, now).await {
                tracing::error!("Failed to record activity on logout: {}", e);
            }
        }
    }

    /// Load the current user's profile data, recording activity
    ///
    /// # Returns
    /// * `Ok((user, roles, permissions))` - Fresh (not snapshot) authorization state
    /// * `Err(AuthError::UserNotFound)` - The id no longer resolves
    pub async fn get_user_details(
        &self,
        user_id: &str,
    ) -> Result<(user::Model, Vec<role::Model>, PermissionMap), AuthError> {
        let user = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(user_id.to_owned()))?;

        let (roles, permissions) = self.resolver.resolve_with_roles(user_id).await?;

        let now = Utc::now().timestamp();
        self.store.touch_last_activity(user_id, now).await?;

        Ok((user, roles, permissions))
    }

    /// Issue an access/refresh pair and persist the refresh token hash
    async fn issue_token_pair(
        &self,
        user_id: &str,
        roles: &[role::Model],
        permissions: PermissionMap,
        now: i64,
    ) -> Result<(String, String), AuthError> {
        let role_names: Vec<String> = roles.iter().map(|r| r.name.clone()).collect();
        let super_admin = roles.iter().any(|r| r.is_super_admin);

        let access_token =
            self.codec
                .issue_access_token(user_id, role_names, super_admin, permissions, now)?;

        let (refresh_token, jti) = self.codec.issue_refresh_token(user_id, now)?;
        let token_hash = self.codec.refresh_lookup_hash(&refresh_token);
        let expires_at = self.codec.refresh_expiration(now);

        self.store
            .insert_refresh_token(&token_hash, &jti, user_id, expires_at, now)
            .await?;

        Ok((access_token, refresh_token))
    }
}
