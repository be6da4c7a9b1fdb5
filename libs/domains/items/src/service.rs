use std::sync::Arc;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, ItemFilter, UpdateItem};
use crate::repository::ItemRepository;

/// Service layer for Item business logic.
///
/// Bridges validated input to storage operations and normalizes error
/// outcomes: validation rejects before any storage call, and backend
/// "absent" results become typed `NotFound` errors carrying the id.
#[derive(Clone)]
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new item after validating the input
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get an item by id
    pub async fn get_item(&self, id: i64) -> ItemResult<Item> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// List items with a pagination window
    pub async fn list_items(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        self.repository.list(filter).await
    }

    /// Partially update an item; only supplied fields are validated and written
    pub async fn update_item(&self, id: i64, input: UpdateItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete an item
    pub async fn delete_item(&self, id: i64) -> ItemResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ItemError::NotFound(id));
        }

        Ok(())
    }
}
