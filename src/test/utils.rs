// Test utilities shared across unit tests
// Only compiled when running tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

use crate::errors::InternalError;
use crate::stores::{ItemRepository, MemoryItemStore};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{Item, UpdateFields};

/// Creates an in-memory SQLite database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Repository double that records every call
///
/// Delegates to a `MemoryItemStore` unless told to fail, and can be primed
/// with fixed category counts to exercise the summary in isolation.
#[derive(Default)]
pub struct RecordingItemRepository {
    inner: MemoryItemStore,
    calls: Mutex<Vec<&'static str>>,
    fail: AtomicBool,
    fixed_counts: Option<HashMap<String, u64>>,
}

impl RecordingItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `aggregate_by_category` with these counts instead of the stored items
    pub fn with_counts(counts: &[(&str, u64)]) -> Self {
        Self {
            fixed_counts: Some(
                counts
                    .iter()
                    .map(|(category, count)| (category.to_string(), *count))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Make every following call fail with a database error
    pub fn fail_with_database_error(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|call| **call == operation).count()
    }

    fn record(&self, operation: &'static str) -> Result<(), InternalError> {
        self.calls.lock().unwrap().push(operation);
        if self.fail.load(Ordering::SeqCst) {
            return Err(InternalError::database(
                operation,
                DbErr::Custom("injected failure".to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for RecordingItemRepository {
    async fn find_all(&self, ctx: &RequestContext) -> Result<Vec<Item>, InternalError> {
        self.record("find_all")?;
        self.inner.find_all(ctx).await
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> Result<Item, InternalError> {
        self.record("find_by_id")?;
        self.inner.find_by_id(ctx, id).await
    }

    async fn create(&self, ctx: &RequestContext, item: &Item) -> Result<Item, InternalError> {
        self.record("create")?;
        self.inner.create(ctx, item).await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        item: &Item,
        changes: &UpdateFields,
    ) -> Result<Item, InternalError> {
        self.record("update")?;
        self.inner.update(ctx, item, changes).await
    }

    async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), InternalError> {
        self.record("delete")?;
        self.inner.delete(ctx, id).await
    }

    async fn aggregate_by_category(
        &self,
        ctx: &RequestContext,
    ) -> Result<HashMap<String, u64>, InternalError> {
        self.record("aggregate_by_category")?;
        match &self.fixed_counts {
            Some(counts) => Ok(counts.clone()),
            None => self.inner.aggregate_by_category(ctx).await,
        }
    }
}
