// Common test utilities for integration tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use prodflow_backend::config::{AuthSettings, SecretManager};
use prodflow_backend::services::{AuthGate, PermissionResolver, SessionManager, TokenCodec};
use prodflow_backend::stores::CredentialStore;
use sea_orm::{Database, DatabaseConnection};

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub struct TestApp {
    pub db: DatabaseConnection,
    pub store: Arc<CredentialStore>,
    pub codec: Arc<TokenCodec>,
    pub session_manager: Arc<SessionManager>,
    pub auth_gate: Arc<AuthGate>,
}

/// Wire the full service stack against an in-memory database.
///
/// Secrets are provided through the environment, the same path production
/// startup takes.
pub async fn setup_test_app() -> TestApp {
    unsafe {
        std::env::set_var(
            "ACCESS_TOKEN_SECRET",
            "integration-access-secret-at-least-32-chars",
        );
        std::env::set_var(
            "REFRESH_TOKEN_SECRET",
            "integration-refresh-secret-at-least-32-chars",
        );
        std::env::set_var("PASSWORD_PEPPER", "integration-pepper-16");
    }

    let db = setup_test_db().await;
    let secret_manager =
        Arc::new(SecretManager::init().expect("Failed to initialize SecretManager"));
    let settings = AuthSettings::default();

    let store = Arc::new(CredentialStore::new(
        db.clone(),
        secret_manager.password_pepper().to_string(),
    ));
    let codec = Arc::new(TokenCodec::new(secret_manager, settings));
    let resolver = Arc::new(PermissionResolver::new(store.clone()));
    let session_manager = Arc::new(SessionManager::new(
        store.clone(),
        codec.clone(),
        resolver,
    ));
    let auth_gate = Arc::new(AuthGate::new(codec.clone()));

    TestApp {
        db,
        store,
        codec,
        session_manager,
        auth_gate,
    }
}

/// Seed the bootstrap admin the way production startup does
pub async fn seed_admin(app: &TestApp) -> String {
    let admin = app
        .store
        .create_user("admin", "admin123", "System", "Administrator", "admin@localhost")
        .await
        .expect("Failed to create admin user");
    let root_role = app
        .store
        .create_role("Super Admin", Some("Bypasses all permission checks"), true)
        .await
        .expect("Failed to create super admin role");
    app.store
        .assign_role(&admin.id, &root_role.id)
        .await
        .expect("Failed to assign role");
    admin.id
}
