use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::Expr,
};

use crate::errors::InternalError;
use crate::errors::internal::DatabaseError;
use crate::stores::ItemRepository;
use crate::types::db::item::{self, ActiveModel, Entity as ItemEntity};
use crate::types::internal::context::RequestContext;
use crate::types::internal::item::parse_purchase_date;
use crate::types::internal::{Category, Item, Patch, UpdateFields};

/// SQL-backed item repository
pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    /// Create a new ItemStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for ItemStore {
    async fn find_all(&self, ctx: &RequestContext) -> Result<Vec<Item>, InternalError> {
        ctx.within_deadline("find_all_items", async {
            let rows = ItemEntity::find()
                .order_by_desc(item::Column::CreatedAt)
                .order_by_desc(item::Column::Id)
                .all(&self.db)
                .await
                .map_err(|e| InternalError::database("find_all_items", e))?;

            tracing::debug!(request_id = %ctx.request_id, "Loaded {} items", rows.len());

            rows.into_iter()
                .map(Item::try_from)
                .collect::<Result<Vec<Item>, InternalError>>()
        })
        .await
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> Result<Item, InternalError> {
        ctx.within_deadline("find_item_by_id", async {
            ItemEntity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| InternalError::database("find_item_by_id", e))?
                .ok_or_else(|| InternalError::not_found(id))
                .and_then(Item::try_from)
        })
        .await
    }

    /// Insert the row and read it back in one transaction
    async fn create(&self, ctx: &RequestContext, item: &Item) -> Result<Item, InternalError> {
        ctx.within_deadline("create_item", async {
            let txn = self
                .db
                .begin()
                .await
                .map_err(|source| DatabaseError::TransactionBegin { source })?;

            let new_item = ActiveModel {
                id: NotSet, // Auto-increment will handle this
                name: Set(item.name.clone()),
                category: Set(item.category.as_str().to_string()),
                brand: Set(item.brand.clone()),
                purchase_price: Set(item.purchase_price),
                purchase_date: Set(item.purchase_date_string()),
                created_at: Set(item.created_at.timestamp_millis()),
                updated_at: Set(item.updated_at.timestamp_millis()),
            };

            let model = new_item
                .insert(&txn)
                .await
                .map_err(|e| InternalError::database("create_item", e))?;

            txn.commit()
                .await
                .map_err(|source| DatabaseError::TransactionCommit { source })?;

            tracing::debug!(request_id = %ctx.request_id, "Inserted item {}", model.id);

            Item::try_from(model)
        })
        .await
    }

    /// `UPDATE items SET <present columns>, updated_at = ? WHERE id = ?`
    async fn update(
        &self,
        ctx: &RequestContext,
        item: &Item,
        changes: &UpdateFields,
    ) -> Result<Item, InternalError> {
        ctx.within_deadline("update_item", async {
            let mut active = ActiveModel {
                updated_at: Set(item.updated_at.timestamp_millis()),
                ..Default::default()
            };
            if let Patch::Value(_) = changes.name {
                active.name = Set(item.name.clone());
            }
            if let Patch::Value(_) = changes.brand {
                active.brand = Set(item.brand.clone());
            }
            if let Patch::Value(_) = changes.purchase_price {
                active.purchase_price = Set(item.purchase_price);
            }

            let txn = self
                .db
                .begin()
                .await
                .map_err(|source| DatabaseError::TransactionBegin { source })?;

            let result = ItemEntity::update_many()
                .set(active)
                .filter(item::Column::Id.eq(item.id))
                .exec(&txn)
                .await
                .map_err(|e| InternalError::database("update_item", e))?;

            if result.rows_affected == 0 {
                return Err(InternalError::not_found(item.id));
            }

            let model = ItemEntity::find_by_id(item.id)
                .one(&txn)
                .await
                .map_err(|e| InternalError::database("reload_updated_item", e))?
                .ok_or_else(|| InternalError::not_found(item.id))?;

            txn.commit()
                .await
                .map_err(|source| DatabaseError::TransactionCommit { source })?;

            tracing::debug!(request_id = %ctx.request_id, "Updated item {}", item.id);

            Item::try_from(model)
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), InternalError> {
        ctx.within_deadline("delete_item", async {
            let result = ItemEntity::delete_by_id(id)
                .exec(&self.db)
                .await
                .map_err(|e| InternalError::database("delete_item", e))?;

            if result.rows_affected == 0 {
                return Err(InternalError::not_found(id));
            }

            tracing::debug!(request_id = %ctx.request_id, "Deleted item {}", id);

            Ok(())
        })
        .await
    }

    async fn aggregate_by_category(
        &self,
        ctx: &RequestContext,
    ) -> Result<HashMap<String, u64>, InternalError> {
        ctx.within_deadline("aggregate_items_by_category", async {
            let rows = ItemEntity::find()
                .select_only()
                .column(item::Column::Category)
                .column_as(Expr::col(item::Column::Id).count(), "count")
                .group_by(item::Column::Category)
                .into_model::<CategoryCount>()
                .all(&self.db)
                .await
                .map_err(|e| InternalError::database("aggregate_items_by_category", e))?;

            rows.into_iter()
                .map(|row| -> Result<(String, u64), InternalError> {
                    let count = u64::try_from(row.count).map_err(|_| {
                        InternalError::parse("category count", format!("negative count {}", row.count))
                    })?;
                    Ok((row.category, count))
                })
                .collect::<Result<HashMap<String, u64>, InternalError>>()
        })
        .await
    }
}

#[derive(FromQueryResult)]
struct CategoryCount {
    category: String,
    count: i64,
}

impl TryFrom<item::Model> for Item {
    type Error = InternalError;

    fn try_from(model: item::Model) -> Result<Self, Self::Error> {
        let category = model
            .category
            .parse::<Category>()
            .map_err(|_| InternalError::parse("category", format!("unknown category '{}'", model.category)))?;

        Ok(Self {
            id: model.id,
            name: model.name,
            category,
            brand: model.brand,
            purchase_price: model.purchase_price,
            purchase_date: normalize_purchase_date(&model.purchase_date)?,
            created_at: from_millis("created_at", model.created_at)?,
            updated_at: from_millis("updated_at", model.updated_at)?,
        })
    }
}

/// Accept stored dates with a trailing time part, as older rows may carry one
fn normalize_purchase_date(raw: &str) -> Result<chrono::NaiveDate, InternalError> {
    let date_part = raw.get(..10).unwrap_or(raw);
    parse_purchase_date(date_part)
        .map_err(|_| InternalError::parse("purchase_date", format!("invalid stored date '{}'", raw)))
}

fn from_millis(column: &str, millis: i64) -> Result<DateTime<Utc>, InternalError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| InternalError::parse(column, format!("timestamp out of range: {}", millis)))
}
