use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::errors::AuthError;

/// Connect to the application database.
///
/// Does NOT run migrations - call `migrate_database()` separately.
pub async fn init_database(database_url: &str) -> Result<DatabaseConnection, AuthError> {
    let db = Database::connect(database_url).await?;

    tracing::debug!("Connected to database: {}", database_url);

    Ok(db)
}

/// Run all pending migrations on the provided database connection
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), AuthError> {
    Migrator::up(db, None).await?;

    tracing::debug!("Database migrations completed");

    Ok(())
}
