use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::AppSettings;
use crate::config::errors::ApplicationError;

/// Connect to the database named in the settings
///
/// Does NOT run migrations - call `migrate_database()` separately.
pub async fn init_database(settings: &AppSettings) -> Result<DatabaseConnection, ApplicationError> {
    let database_url = settings.database_url();

    let db = Database::connect(database_url)
        .await
        .map_err(|e| ApplicationError::DatabaseConnection(format!("{}: {}", database_url, e)))?;

    tracing::debug!("Connected to database: {}", database_url);

    Ok(db)
}

/// Run all pending migrations
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), ApplicationError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| ApplicationError::Migration(e.to_string()))?;

    tracing::debug!("Database migrations completed");

    Ok(())
}
