use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::InternalError;
use crate::stores::ItemRepository;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{Item, Patch, UpdateFields};

/// In-memory item repository
///
/// Useful for testing and as a reference implementation of the
/// repository contract. Ids count up from 1 and are never handed out twice.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    items: BTreeMap<i64, Item>,
    last_id: i64,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ItemRepository for MemoryItemStore {
    async fn find_all(&self, ctx: &RequestContext) -> Result<Vec<Item>, InternalError> {
        ctx.within_deadline("find_all_items", async {
            let state = self.state.read().await;
            let mut items: Vec<Item> = state.items.values().cloned().collect();
            items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok::<_, InternalError>(items)
        })
        .await
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> Result<Item, InternalError> {
        ctx.within_deadline("find_item_by_id", async {
            self.state
                .read()
                .await
                .items
                .get(&id)
                .cloned()
                .ok_or_else(|| InternalError::not_found(id))
        })
        .await
    }

    async fn create(&self, ctx: &RequestContext, item: &Item) -> Result<Item, InternalError> {
        ctx.within_deadline("create_item", async {
            let mut state = self.state.write().await;
            state.last_id += 1;

            let mut stored = item.clone();
            stored.id = state.last_id;
            state.items.insert(stored.id, stored.clone());

            tracing::debug!(request_id = %ctx.request_id, "Inserted item {} in memory", stored.id);
            Ok::<_, InternalError>(stored)
        })
        .await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        item: &Item,
        changes: &UpdateFields,
    ) -> Result<Item, InternalError> {
        ctx.within_deadline("update_item", async {
            let mut state = self.state.write().await;
            let stored = state
                .items
                .get_mut(&item.id)
                .ok_or_else(|| InternalError::not_found(item.id))?;

            if let Patch::Value(_) = changes.name {
                stored.name = item.name.clone();
            }
            if let Patch::Value(_) = changes.brand {
                stored.brand = item.brand.clone();
            }
            if let Patch::Value(_) = changes.purchase_price {
                stored.purchase_price = item.purchase_price;
            }
            stored.updated_at = item.updated_at;

            Ok::<_, InternalError>(stored.clone())
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), InternalError> {
        ctx.within_deadline("delete_item", async {
            match self.state.write().await.items.remove(&id) {
                Some(_) => Ok(()),
                None => Err(InternalError::not_found(id)),
            }
        })
        .await
    }

    async fn aggregate_by_category(
        &self,
        ctx: &RequestContext,
    ) -> Result<HashMap<String, u64>, InternalError> {
        ctx.within_deadline("aggregate_items_by_category", async {
            let state = self.state.read().await;
            let mut counts: HashMap<String, u64> = HashMap::new();
            for item in state.items.values() {
                *counts.entry(item.category.as_str().to_string()).or_insert(0) += 1;
            }
            Ok::<_, InternalError>(counts)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::Category;
    use chrono::DateTime;

    fn bag() -> Item {
        Item::new("Kelly", "Bag", "HERMES", 2_000_000, "2022-05-01").unwrap()
    }

    #[tokio::test]
    async fn memory_store_create_assigns_increasing_ids() {
        let store = MemoryItemStore::new();
        let ctx = RequestContext::new();

        let first = store.create(&ctx, &bag()).await.unwrap();
        let second = store.create(&ctx, &bag()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn memory_store_never_reuses_ids() {
        let store = MemoryItemStore::new();
        let ctx = RequestContext::new();

        let first = store.create(&ctx, &bag()).await.unwrap();
        store.delete(&ctx, first.id).await.unwrap();
        let second = store.create(&ctx, &bag()).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn memory_store_missing_ids_are_not_found() {
        let store = MemoryItemStore::new();
        let ctx = RequestContext::new();
        let mut ghost = bag();
        ghost.id = 5;
        let changes = UpdateFields {
            brand: Patch::Value("Birkin".to_string()),
            ..Default::default()
        };

        assert!(store.find_by_id(&ctx, 5).await.unwrap_err().is_not_found());
        assert!(store.delete(&ctx, 5).await.unwrap_err().is_not_found());
        assert!(store.update(&ctx, &ghost, &changes).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn memory_store_update_touches_only_present_fields() {
        let store = MemoryItemStore::new();
        let ctx = RequestContext::new();
        let created = store.create(&ctx, &bag()).await.unwrap();

        // Merged copy with a stale name; the patch does not mention name so it must not land
        let mut merged = created.clone();
        merged.name = "stale".to_string();
        merged.purchase_price = 0;
        let changes = UpdateFields {
            purchase_price: Patch::Value(0),
            ..Default::default()
        };

        let updated = store.update(&ctx, &merged, &changes).await.unwrap();

        assert_eq!(updated.purchase_price, 0);
        assert_eq!(updated.name, "Kelly");
    }

    #[tokio::test]
    async fn memory_store_lists_newest_first() {
        let store = MemoryItemStore::new();
        let ctx = RequestContext::new();

        let mut older = bag();
        older.created_at = DateTime::from_timestamp_millis(1_000).unwrap();
        let mut newer = Item::new("Daytona", "Watch", "ROLEX", 1, "2023-01-15").unwrap();
        newer.created_at = DateTime::from_timestamp_millis(5_000).unwrap();

        store.create(&ctx, &older).await.unwrap();
        store.create(&ctx, &newer).await.unwrap();

        let items = store.find_all(&ctx).await.unwrap();
        assert_eq!(items[0].name, "Daytona");
        assert_eq!(items[1].name, "Kelly");
    }

    #[tokio::test]
    async fn memory_store_aggregates_by_category() {
        let store = MemoryItemStore::new();
        let ctx = RequestContext::new();

        store.create(&ctx, &bag()).await.unwrap();
        store.create(&ctx, &bag()).await.unwrap();

        let counts = store.aggregate_by_category(&ctx).await.unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(Category::Bag.as_str()), Some(&2));
    }
}
