use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{CreateItem, Item, ItemFilter, UpdateItem},
    repository::ItemRepository,
};

/// PostgreSQL-backed implementation of ItemRepository.
///
/// Each operation maps to a single statement-scoped transaction; there is
/// no locking, so concurrent updates to the same id are last-writer-wins.
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(item_id = %model.id, "Created item");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        // Stable primary-key order; negative window values clamp to zero,
        // matching the in-memory variant.
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .offset(filter.skip.max(0) as u64)
            .limit(filter.limit.max(0) as u64)
            .all(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<Item> {
        // Fetch existing record
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?
            .ok_or(ItemError::NotFound(id))?;

        // Merge supplied fields in the domain model
        let mut item: Item = model.into();
        item.apply_update(input);

        // Write the merged record back
        let active_model = entity::ActiveModel {
            id: Set(item.id),
            name: Set(item.name.clone()),
            description: Set(item.description.clone()),
            price: Set(item.price),
            created_at: Set(item.created_at.into()),
            updated_at: Set(item.updated_at.into()),
        };

        let updated_model = active_model
            .update(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(item_id = %id, "Updated item");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: i64) -> ItemResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ItemError::Internal(format!("Database error: {}", e)))?;

        if result.rows_affected > 0 {
            tracing::info!(item_id = %id, "Deleted item");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
