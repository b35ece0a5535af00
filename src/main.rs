mod api;
mod app_data;
mod config;
mod errors;
mod services;
mod stores;
mod types;

use poem::middleware::{CookieJarManager, Cors};
use poem::{listener::TcpListener, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;

use api::{AuthApi, HealthApi};
use app_data::AppData;
use config::{init_database, init_logging, migrate_database};
use stores::CredentialStore;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://prodflow.db?mode=rwc".to_string());

    let db = init_database(&database_url)
        .await
        .expect("Failed to connect to database");

    migrate_database(&db)
        .await
        .expect("Failed to run migrations");

    let app_data = AppData::init(db).expect("Failed to initialize application data");

    seed_admin_if_empty(&app_data.credential_store)
        .await
        .expect("Failed to seed admin user");

    let auth_api = AuthApi::new(
        app_data.session_manager.clone(),
        app_data.auth_gate.clone(),
        app_data.settings.clone(),
    );

    let api_service = OpenApiService::new((HealthApi, auth_api), "ProdFlow Backend", "1.0.0")
        .server("http://localhost:3000/api");
    let ui = api_service.swagger_ui();

    // Credentialed CORS: the refresh cookie crosses origins, so the allowed
    // origin must be explicit, never a wildcard
    let cors = Cors::new()
        .allow_origin(app_data.settings.frontend_origin.as_str())
        .allow_credentials(true);

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(CookieJarManager::new())
        .with(cors);

    tracing::info!("Starting server on http://0.0.0.0:3000");
    tracing::info!("Swagger UI available at http://localhost:3000/swagger");

    Server::new(TcpListener::bind("0.0.0.0:3000")).run(app).await
}

/// Seed the bootstrap admin account when the users table is empty.
///
/// The password comes from ADMIN_PASSWORD and should be rotated immediately
/// in any real deployment.
async fn seed_admin_if_empty(store: &CredentialStore) -> Result<(), errors::AuthError> {
    if store.count_users().await? > 0 {
        return Ok(());
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

    let admin = store
        .create_user("admin", &password, "System", "Administrator", "admin@localhost")
        .await?;
    let root_role = store
        .create_role("Super Admin", Some("Bypasses all permission checks"), true)
        .await?;
    store.assign_role(&admin.id, &root_role.id).await?;

    tracing::info!("Seeded bootstrap admin user (login: admin)");

    Ok(())
}
