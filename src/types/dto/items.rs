use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use poem_openapi::Object;
use poem_openapi::types::MaybeUndefined;

use crate::types::internal::{CategorySummary, CreateItemInput, Item, UpdateFields};

/// Request model for creating a new item
///
/// Fields default to empty so that missing ones are reported by item
/// validation together, not rejected one at a time by the parser.
#[derive(Object, Debug, Clone)]
pub struct CreateItemRequest {
    /// Name of the item
    #[oai(default)]
    pub name: String,

    /// One of Watch, Bag, Jewelry, Shoes, Other
    #[oai(default)]
    pub category: String,

    /// Brand or maker
    #[oai(default)]
    pub brand: String,

    /// Price paid, in minor currency units
    #[oai(default)]
    pub purchase_price: i64,

    /// Date of purchase (YYYY-MM-DD)
    #[oai(default)]
    pub purchase_date: String,
}

impl From<CreateItemRequest> for CreateItemInput {
    fn from(request: CreateItemRequest) -> Self {
        Self {
            name: request.name,
            category: request.category,
            brand: request.brand,
            purchase_price: request.purchase_price,
            purchase_date: request.purchase_date,
        }
    }
}

/// Request model for a partial update
///
/// Omitted fields are left untouched. Sending `null` is rejected.
#[derive(Object, Debug, Clone, Default)]
pub struct UpdateItemRequest {
    /// New name
    pub name: MaybeUndefined<String>,

    /// New brand
    pub brand: MaybeUndefined<String>,

    /// New price, in minor currency units; 0 is a valid price
    pub purchase_price: MaybeUndefined<i64>,
}

impl From<UpdateItemRequest> for UpdateFields {
    fn from(request: UpdateItemRequest) -> Self {
        Self {
            name: request.name.into(),
            brand: request.brand.into(),
            purchase_price: request.purchase_price.into(),
        }
    }
}

/// Response model representing a stored item
#[derive(Object, Debug, Clone)]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub purchase_price: i64,

    /// Date of purchase (YYYY-MM-DD)
    pub purchase_date: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            purchase_date: item.purchase_date_string(),
            category: item.category.to_string(),
            name: item.name,
            brand: item.brand,
            purchase_price: item.purchase_price,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Item counts per category
#[derive(Object, Debug, Clone)]
pub struct CategorySummaryResponse {
    /// Every known category, 0 when it holds no items
    pub categories: BTreeMap<String, u64>,

    /// Number of stored items
    pub total: u64,
}

impl From<CategorySummary> for CategorySummaryResponse {
    fn from(summary: CategorySummary) -> Self {
        Self {
            categories: summary
                .categories
                .into_iter()
                .map(|(category, count)| (category.to_string(), count))
                .collect(),
            total: summary.total,
        }
    }
}
