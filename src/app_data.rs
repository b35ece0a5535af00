use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{AuthSettings, SecretManager};
use crate::errors::AuthError;
use crate::services::{AuthGate, PermissionResolver, SessionManager, TokenCodec};
use crate::stores::CredentialStore;

/// Centralized application data following the main-owned stores pattern.
///
/// All dependencies are created once in main.rs and shared across the API
/// layer via Arc, keeping handler signatures stable.
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: AuthSettings,
    pub secret_manager: Arc<SecretManager>,
    pub credential_store: Arc<CredentialStore>,
    pub token_codec: Arc<TokenCodec>,
    pub permission_resolver: Arc<PermissionResolver>,
    pub session_manager: Arc<SessionManager>,
    pub auth_gate: Arc<AuthGate>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database connection should be initialized and migrated before
    /// calling this.
    ///
    /// # Errors
    /// Returns `AuthError` when secret manager initialization fails
    pub fn init(db: DatabaseConnection) -> Result<Self, AuthError> {
        tracing::info!("Initializing AppData...");

        tracing::debug!("Initializing secret manager...");
        let secret_manager = Arc::new(
            SecretManager::init()
                .map_err(|e| AuthError::TokenGeneration(format!("Secret manager init failed: {}", e)))?,
        );
        tracing::debug!("Secret manager initialized");

        let settings = AuthSettings::from_env();

        let credential_store = Arc::new(CredentialStore::new(
            db.clone(),
            secret_manager.password_pepper().to_string(),
        ));

        let token_codec = Arc::new(TokenCodec::new(secret_manager.clone(), settings.clone()));
        let permission_resolver = Arc::new(PermissionResolver::new(credential_store.clone()));
        let session_manager = Arc::new(SessionManager::new(
            credential_store.clone(),
            token_codec.clone(),
            permission_resolver.clone(),
        ));
        let auth_gate = Arc::new(AuthGate::new(token_codec.clone()));

        tracing::info!("AppData initialization complete");

        Ok(Self {
            db,
            settings,
            secret_manager,
            credential_store,
            token_codec,
            permission_resolver,
            session_manager,
            auth_gate,
        })
    }
}
