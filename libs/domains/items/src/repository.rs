use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, ItemFilter, UpdateItem};

/// Repository trait for Item persistence.
///
/// Both storage variants satisfy this identical contract, so the service
/// and handlers are written once and parameterized over the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Create a new item, assigning a unique id and timestamps
    async fn create(&self, input: CreateItem) -> ItemResult<Item>;

    /// Get an item by id
    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// List items in stable ascending-id order with a pagination window
    async fn list(&self, filter: ItemFilter) -> ItemResult<Vec<Item>>;

    /// Merge supplied fields into an existing item
    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<Item>;

    /// Delete an item by id, returning whether a record existed
    async fn delete(&self, id: i64) -> ItemResult<bool>;
}

#[derive(Debug, Default)]
struct MemoryStore {
    /// Keyed by id; ids are assigned in increasing order, so iteration
    /// order is insertion order.
    items: BTreeMap<i64, Item>,
    /// Last assigned id. Never decremented, so ids are not reused within
    /// the process lifetime even after deletes.
    next_id: i64,
}

/// In-memory implementation of ItemRepository.
///
/// State lives in the process and is lost on restart. An explicit store
/// object (not a module-level global) so tests get a fresh store each.
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    store: Arc<RwLock<MemoryStore>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let mut store = self.store.write().await;

        store.next_id += 1;
        let item = Item::new(store.next_id, input);
        store.items.insert(item.id, item.clone());

        tracing::info!(item_id = %item.id, "Created item");
        Ok(item)
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let store = self.store.read().await;
        Ok(store.items.get(&id).cloned())
    }

    async fn list(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        let store = self.store.read().await;

        // Negative skip/limit clamp to zero; out-of-range skip yields an
        // empty list rather than an error.
        let skip = filter.skip.max(0) as usize;
        let limit = filter.limit.max(0) as usize;

        let result = store
            .items
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();

        Ok(result)
    }

    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<Item> {
        let mut store = self.store.write().await;

        let item = store.items.get_mut(&id).ok_or(ItemError::NotFound(id))?;
        item.apply_update(input);
        let updated = item.clone();

        tracing::info!(item_id = %id, "Updated item");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ItemResult<bool> {
        let mut store = self.store.write().await;

        if store.items.remove(&id).is_some() {
            tracing::info!(item_id = %id, "Deleted item");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(name: &str, price: Option<f64>) -> CreateItem {
        CreateItem {
            name: name.to_string(),
            description: None,
            price,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryItemRepository::new();

        let first = repo.create(widget("first", None)).await.unwrap();
        let second = repo.create(widget("second", None)).await.unwrap();
        let third = repo.create(widget("third", None)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_create_preserves_input_fields() {
        let repo = InMemoryItemRepository::new();

        let input = CreateItem {
            name: "Widget".to_string(),
            description: Some("A widget".to_string()),
            price: Some(10.0),
        };
        let created = repo.create(input).await.unwrap();

        assert_eq!(created.name, "Widget");
        assert_eq!(created.description.as_deref(), Some("A widget"));
        assert_eq!(created.price, Some(10.0));
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_get_after_create_round_trips() {
        let repo = InMemoryItemRepository::new();
        let created = repo.create(widget("Widget", Some(10.0))).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, created.name);
        assert_eq!(fetched.price, created.price);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = InMemoryItemRepository::new();
        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_touches_only_supplied_fields() {
        let repo = InMemoryItemRepository::new();
        let created = repo
            .create(CreateItem {
                name: "Widget".to_string(),
                description: Some("original".to_string()),
                price: Some(10.0),
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateItem {
                    price: Some(9.99),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.description.as_deref(), Some("original"));
        assert_eq!(updated.price, Some(9.99));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_not_found() {
        let repo = InMemoryItemRepository::new();

        let result = repo.update(999, UpdateItem::default()).await;
        assert!(matches!(result, Err(ItemError::NotFound(999))));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_gone() {
        let repo = InMemoryItemRepository::new();
        let created = repo.create(widget("Widget", None)).await.unwrap();

        let deleted = repo.delete(created.id).await.unwrap();
        assert!(deleted, "delete should report an existing record");

        assert!(repo.get_by_id(created.id).await.unwrap().is_none());

        // Repeat delete reports absence instead of succeeding silently
        let deleted_again = repo.delete(created.id).await.unwrap();
        assert!(!deleted_again);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryItemRepository::new();

        let first = repo.create(widget("first", None)).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.create(widget("second", None)).await.unwrap();
        assert_eq!(second.id, 2, "deleted ids must not be reissued");
    }

    #[tokio::test]
    async fn test_list_returns_creation_order() {
        let repo = InMemoryItemRepository::new();
        for name in ["first", "second", "third"] {
            repo.create(widget(name, None)).await.unwrap();
        }

        let items = repo.list(ItemFilter::default()).await.unwrap();
        assert_eq!(items.len(), 3);
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_list_pagination_window() {
        let repo = InMemoryItemRepository::new();
        for i in 0..5 {
            repo.create(widget(&format!("item-{}", i), None)).await.unwrap();
        }

        let page = repo
            .list(ItemFilter { skip: 1, limit: 2 })
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "item-1");
        assert_eq!(page[1].name, "item-2");
    }

    #[tokio::test]
    async fn test_list_out_of_range_skip_is_empty() {
        let repo = InMemoryItemRepository::new();
        repo.create(widget("only", None)).await.unwrap();

        let items = repo
            .list(ItemFilter { skip: 50, limit: 100 })
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_list_negative_window_clamps_to_zero() {
        let repo = InMemoryItemRepository::new();
        for name in ["first", "second"] {
            repo.create(widget(name, None)).await.unwrap();
        }

        let items = repo
            .list(ItemFilter { skip: -3, limit: 100 })
            .await
            .unwrap();
        assert_eq!(items.len(), 2, "negative skip behaves like zero");

        let items = repo
            .list(ItemFilter { skip: 0, limit: -1 })
            .await
            .unwrap();
        assert!(items.is_empty(), "negative limit behaves like zero");
    }
}
