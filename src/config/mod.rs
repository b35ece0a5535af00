mod auth_settings;
mod database;
mod logging;
mod secret_config;
mod secret_manager;

pub use auth_settings::AuthSettings;
pub use database::{init_database, migrate_database};
pub use logging::init_logging;
pub use secret_config::{SecretConfig, SecretType};
pub use secret_manager::{SecretError, SecretManager};
