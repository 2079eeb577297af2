use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::InternalError;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{Item, UpdateFields};

/// Persistence operations the item service relies on
///
/// Implementations must:
/// - apply `create` and `update` atomically
/// - report `InternalError::NotFound` when `update` or `delete` touches no row
/// - never reuse an id, even after the item holding it was deleted
/// - honour the deadline carried by the `RequestContext`
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, newest first (ties broken by id, highest first)
    async fn find_all(&self, ctx: &RequestContext) -> Result<Vec<Item>, InternalError>;

    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> Result<Item, InternalError>;

    /// Persist a new item and return it with its assigned id
    async fn create(&self, ctx: &RequestContext, item: &Item) -> Result<Item, InternalError>;

    /// Persist an already merged item
    ///
    /// Only the columns that `changes` marks as present are written, plus
    /// `updated_at`. Presence must be read from `changes`, never inferred
    /// from the values in `item`.
    async fn update(
        &self,
        ctx: &RequestContext,
        item: &Item,
        changes: &UpdateFields,
    ) -> Result<Item, InternalError>;

    async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), InternalError>;

    /// Item count per stored category name; categories without items are omitted
    async fn aggregate_by_category(
        &self,
        ctx: &RequestContext,
    ) -> Result<HashMap<String, u64>, InternalError>;
}
