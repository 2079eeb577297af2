use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::ValidationError;
use crate::stores::ItemRepository;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{CategorySummary, CreateItemInput, Item, UpdateFields};

/// Item service that orchestrates validation, merging and persistence
///
/// Holds no state of its own beyond the repository handle. Errors from the
/// repository are passed on with their kind intact (NotFound stays NotFound,
/// backend failures stay Database) so the API layer can map them without
/// looking at messages.
pub struct ItemService {
    item_repository: Arc<dyn ItemRepository>,
}

impl ItemService {
    /// Create ItemService from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            item_repository: Arc::clone(&app_data.item_repository),
        }
    }

    /// Create ItemService over an explicit repository
    pub fn with_repository(item_repository: Arc<dyn ItemRepository>) -> Self {
        Self { item_repository }
    }

    /// List every item, newest first
    pub async fn list_items(&self, ctx: &RequestContext) -> Result<Vec<Item>, InternalError> {
        self.item_repository.find_all(ctx).await
    }

    /// Get a single item
    ///
    /// # Returns
    /// * `Ok(Item)` - The stored item
    /// * `Err(InternalError)` - InvalidInput for id <= 0, NotFound, or a database error
    pub async fn get_item(&self, ctx: &RequestContext, id: i64) -> Result<Item, InternalError> {
        validate_id(id)?;
        self.item_repository.find_by_id(ctx, id).await
    }

    /// Validate the input and store a new item
    ///
    /// # Returns
    /// * `Ok(Item)` - The stored item with its assigned id
    /// * `Err(InternalError)` - InvalidInput describing the failing field(s), or a database error
    pub async fn create_item(
        &self,
        ctx: &RequestContext,
        input: &CreateItemInput,
    ) -> Result<Item, InternalError> {
        let item = Item::from_input(input)?;

        let created = self.item_repository.create(ctx, &item).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            "Created item {} ({}, {})",
            created.id,
            created.category,
            created.brand
        );

        Ok(created)
    }

    /// Apply a partial update to an existing item
    ///
    /// The patch is checked before the item is fetched, so an invalid or
    /// empty patch never reaches the repository. Concurrent updates of the
    /// same item are last-writer-wins per column.
    ///
    /// # Returns
    /// * `Ok(Item)` - The item as stored after the update
    /// * `Err(InternalError)` - InvalidInput, NotFound, or a database error
    pub async fn update_item(
        &self,
        ctx: &RequestContext,
        id: i64,
        fields: &UpdateFields,
    ) -> Result<Item, InternalError> {
        validate_id(id)?;
        fields.validate()?;

        let mut item = self.item_repository.find_by_id(ctx, id).await?;
        item.apply_update(fields)?;

        let updated = self.item_repository.update(ctx, &item, fields).await?;

        tracing::info!(request_id = %ctx.request_id, "Updated item {}", updated.id);

        Ok(updated)
    }

    /// Delete an item
    ///
    /// # Returns
    /// * `Ok(())` - Item deleted
    /// * `Err(InternalError)` - InvalidInput for id <= 0, NotFound, or a database error
    pub async fn delete_item(&self, ctx: &RequestContext, id: i64) -> Result<(), InternalError> {
        validate_id(id)?;

        self.item_repository.find_by_id(ctx, id).await?;
        self.item_repository.delete(ctx, id).await?;

        tracing::info!(request_id = %ctx.request_id, "Deleted item {}", id);

        Ok(())
    }

    /// Count items per category, with every category present
    pub async fn get_category_summary(
        &self,
        ctx: &RequestContext,
    ) -> Result<CategorySummary, InternalError> {
        let counts = self.item_repository.aggregate_by_category(ctx).await?;
        Ok(CategorySummary::from_counts(&counts))
    }
}

fn validate_id(id: i64) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::InvalidId(id));
    }
    Ok(())
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod item_service_tests;
