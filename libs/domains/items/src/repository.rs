use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::models::{Category, Item};

/// Repository trait for Item persistence
///
/// The service depends only on this trait, so storage backends can be
/// swapped (or mocked) without touching business rules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// List every item
    async fn find_all(&self) -> ItemResult<Vec<Item>>;

    /// Get an item by ID; fails with `NotFound` when absent
    async fn find_by_id(&self, id: i64) -> ItemResult<Item>;

    /// Persist a new item, returning it with its assigned ID
    async fn create(&self, item: Item) -> ItemResult<Item>;

    /// Overwrite a stored item, returning the stored state
    async fn update(&self, item: Item) -> ItemResult<Item>;

    /// Delete an item by ID
    async fn delete(&self, id: i64) -> ItemResult<()>;

    /// Item counts for categories holding at least one item
    async fn get_summary_by_category(&self) -> ItemResult<HashMap<Category, u64>>;
}

#[derive(Debug, Default)]
struct Store {
    items: BTreeMap<i64, Item>,
    last_id: i64,
}

/// In-memory implementation of ItemRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        let store = self.store.read().await;
        Ok(store.items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> ItemResult<Item> {
        let store = self.store.read().await;
        store.items.get(&id).cloned().ok_or(ItemError::NotFound(id))
    }

    async fn create(&self, mut item: Item) -> ItemResult<Item> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let now = Utc::now();
        item.id = store.last_id;
        item.created_at = now;
        item.updated_at = now;
        store.items.insert(item.id, item.clone());

        tracing::info!(item_id = item.id, "Created item");
        Ok(item)
    }

    async fn update(&self, mut item: Item) -> ItemResult<Item> {
        let mut store = self.store.write().await;

        let stored = store
            .items
            .get_mut(&item.id)
            .ok_or(ItemError::NotFound(item.id))?;

        item.created_at = stored.created_at;
        item.updated_at = Utc::now();
        *stored = item.clone();

        tracing::info!(item_id = item.id, "Updated item");
        Ok(item)
    }

    async fn delete(&self, id: i64) -> ItemResult<()> {
        let mut store = self.store.write().await;

        if store.items.remove(&id).is_none() {
            return Err(ItemError::NotFound(id));
        }

        tracing::info!(item_id = id, "Deleted item");
        Ok(())
    }

    async fn get_summary_by_category(&self) -> ItemResult<HashMap<Category, u64>> {
        let store = self.store.read().await;

        let mut counts = HashMap::new();
        for item in store.items.values() {
            *counts.entry(item.category).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
