//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{CategorySummary, CreateItemInput, Item, UpdateItemInput};
use crate::repository::ItemRepository;

/// Item service providing business logic operations
///
/// Every check on caller input happens here, before the repository is
/// consulted. Errors raised by the repository are returned as-is.
///
/// Each method performs at most two sequential repository calls. Dropping
/// the returned future cancels the operation at its pending `.await`, so a
/// caller-side timeout never lets a later repository call run.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

fn ensure_valid_id(id: i64) -> ItemResult<()> {
    if id <= 0 {
        tracing::debug!(id, "Rejected non-positive item id");
        return Err(ItemError::InvalidInput(format!(
            "item id must be positive, got {id}"
        )));
    }
    Ok(())
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every item in repository order
    #[instrument(skip(self))]
    pub async fn get_all_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.find_all().await
    }

    /// Get an item by ID
    #[instrument(skip(self))]
    pub async fn get_item_by_id(&self, id: i64) -> ItemResult<Item> {
        ensure_valid_id(id)?;
        self.repository.find_by_id(id).await
    }

    /// Create a new item
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: CreateItemInput) -> ItemResult<Item> {
        let item = Item::new(input).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected item creation");
        })?;

        let created = self.repository.create(item).await?;
        tracing::info!(item_id = created.id, "Item created");
        Ok(created)
    }

    /// Apply a partial update to an existing item
    ///
    /// Only the fields present in `input` change. The merged item is
    /// validated with the creation rules before anything is written.
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: i64, input: UpdateItemInput) -> ItemResult<Item> {
        ensure_valid_id(id)?;

        if input.is_empty() {
            tracing::debug!(id, "Rejected update with no fields");
            return Err(ItemError::InvalidInput(
                "at least one field must be provided for update".to_string(),
            ));
        }

        let existing = self.repository.find_by_id(id).await?;

        let merged = existing.merge(input).inspect_err(|e| {
            tracing::warn!(item_id = id, error = %e, "Rejected item update");
        })?;

        // A NotFound here means the row vanished after the fetch; it is
        // reported like any other repository error.
        let updated = self.repository.update(merged).await?;
        tracing::info!(item_id = updated.id, "Item updated");
        Ok(updated)
    }

    /// Delete an item after confirming it exists
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> ItemResult<()> {
        ensure_valid_id(id)?;

        self.repository.find_by_id(id).await?;
        self.repository.delete(id).await?;

        tracing::info!(item_id = id, "Item deleted");
        Ok(())
    }

    /// Count items per category, including categories with no items
    #[instrument(skip(self))]
    pub async fn get_category_summary(&self) -> ItemResult<CategorySummary> {
        let counts = self.repository.get_summary_by_category().await?;
        Ok(CategorySummary::from_counts(counts))
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
