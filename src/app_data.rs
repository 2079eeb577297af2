use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppSettings;
use crate::stores::{ItemRepository, ItemStore};

/// Centralized application data following the main-owned stores pattern
///
/// Everything is created once in main.rs and shared with the services.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(db, settings)
///   ├─ db (DatabaseConnection)
///   ├─ settings (AppSettings)
///   └─ item_repository (Arc<dyn ItemRepository>, SQL backed)
///   ↓ wrapped in Arc<AppData>
///   └─ ItemService::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: AppSettings,
    pub item_repository: Arc<dyn ItemRepository>,
}

impl AppData {
    /// Initialize application data over a connected, migrated database
    pub fn init(db: DatabaseConnection, settings: AppSettings) -> Self {
        tracing::info!("Initializing AppData...");

        let item_repository: Arc<dyn ItemRepository> = Arc::new(ItemStore::new(db.clone()));

        Self::with_repository(db, settings, item_repository)
    }

    /// Initialize application data with an explicitly chosen repository
    pub fn with_repository(
        db: DatabaseConnection,
        settings: AppSettings,
        item_repository: Arc<dyn ItemRepository>,
    ) -> Self {
        Self {
            db,
            settings,
            item_repository,
        }
    }
}
