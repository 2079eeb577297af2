use std::sync::Arc;
use std::time::Duration;

use poem_openapi::{ApiResponse, OpenApi, Tags, param::Path, payload::Json};

use crate::errors::ItemApiError;
use crate::services::ItemService;
use crate::types::dto::items::{
    CategorySummaryResponse, CreateItemRequest, ItemResponse, UpdateItemRequest,
};
use crate::types::internal::context::RequestContext;

/// Item endpoints
pub struct ItemsApi {
    item_service: Arc<ItemService>,
    request_timeout: Option<Duration>,
}

impl ItemsApi {
    /// Create a new ItemsApi
    ///
    /// # Arguments
    /// * `item_service` - Service every handler delegates to
    /// * `request_timeout` - Deadline given to each request; `None` for unbounded
    pub fn new(item_service: Arc<ItemService>, request_timeout: Option<Duration>) -> Self {
        Self {
            item_service,
            request_timeout,
        }
    }

    fn context(&self) -> RequestContext {
        RequestContext::for_api(self.request_timeout)
    }
}

/// API tags for item endpoints
#[derive(Tags)]
enum ItemTags {
    /// Item management endpoints
    Items,
}

#[derive(ApiResponse)]
enum CreateItemResponse {
    /// Item created
    #[oai(status = 201)]
    Created(Json<ItemResponse>),
}

#[derive(ApiResponse)]
enum DeleteItemResponse {
    /// Item deleted
    #[oai(status = 204)]
    Deleted,
}

#[OpenApi]
impl ItemsApi {
    /// List every item, newest first
    #[oai(path = "/items", method = "get", tag = "ItemTags::Items")]
    async fn list_items(&self) -> Result<Json<Vec<ItemResponse>>, ItemApiError> {
        let items = self.item_service.list_items(&self.context()).await?;
        Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
    }

    /// Item count per category
    ///
    /// Every category is listed, with 0 when it holds no items.
    #[oai(path = "/items/summary", method = "get", tag = "ItemTags::Items")]
    async fn get_summary(&self) -> Result<Json<CategorySummaryResponse>, ItemApiError> {
        let summary = self.item_service.get_category_summary(&self.context()).await?;
        Ok(Json(summary.into()))
    }

    /// Get a single item
    #[oai(path = "/items/:id", method = "get", tag = "ItemTags::Items")]
    async fn get_item(&self, id: Path<i64>) -> Result<Json<ItemResponse>, ItemApiError> {
        let item = self.item_service.get_item(&self.context(), id.0).await?;
        Ok(Json(item.into()))
    }

    /// Create a new item
    #[oai(path = "/items", method = "post", tag = "ItemTags::Items")]
    async fn create_item(
        &self,
        body: Json<CreateItemRequest>,
    ) -> Result<CreateItemResponse, ItemApiError> {
        let item = self
            .item_service
            .create_item(&self.context(), &body.0.into())
            .await?;
        Ok(CreateItemResponse::Created(Json(item.into())))
    }

    /// Partially update an item
    ///
    /// Only name, brand and purchase_price can change. Omitted fields keep
    /// their stored value.
    #[oai(path = "/items/:id", method = "patch", tag = "ItemTags::Items")]
    async fn update_item(
        &self,
        id: Path<i64>,
        body: Json<UpdateItemRequest>,
    ) -> Result<Json<ItemResponse>, ItemApiError> {
        let item = self
            .item_service
            .update_item(&self.context(), id.0, &body.0.into())
            .await?;
        Ok(Json(item.into()))
    }

    /// Delete an item
    #[oai(path = "/items/:id", method = "delete", tag = "ItemTags::Items")]
    async fn delete_item(&self, id: Path<i64>) -> Result<DeleteItemResponse, ItemApiError> {
        self.item_service.delete_item(&self.context(), id.0).await?;
        Ok(DeleteItemResponse::Deleted)
    }
}
