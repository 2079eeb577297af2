// Common test utilities for integration tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use valuables_backend::services::ItemService;
use valuables_backend::stores::{ItemRepository, ItemStore};

/// Creates an in-memory items database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Creates an ItemService backed by a fresh SQL store
#[allow(dead_code)]
pub async fn setup_sql_service() -> (DatabaseConnection, ItemService) {
    let db = setup_test_db().await;
    let repository: Arc<dyn ItemRepository> = Arc::new(ItemStore::new(db.clone()));
    (db, ItemService::with_repository(repository))
}
