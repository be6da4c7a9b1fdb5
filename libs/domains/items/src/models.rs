use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Item entity - the single managed catalog record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique identifier, assigned by the storage backend on creation
    pub id: i64,
    /// Item name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Optional price, never negative
    pub price: Option<f64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

/// DTO for partially updating an existing item.
///
/// A field left out of the request body deserializes to `None`, is not
/// validated, and keeps its stored value. Supplied fields are validated
/// with the same rules as creation.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

impl UpdateItem {
    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none()
    }
}

/// Pagination window for listing items
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ItemFilter {
    /// Number of leading records to skip
    #[serde(default)]
    pub skip: i64,
    /// Maximum number of records to return
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl Item {
    /// Create a new item from a CreateItem DTO and a backend-assigned id
    pub fn new(id: i64, input: CreateItem) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from an UpdateItem DTO.
    ///
    /// Only supplied fields are overwritten; `updated_at` is always bumped.
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = Some(price);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str) -> CreateItem {
        CreateItem {
            name: name.to_string(),
            description: None,
            price: None,
        }
    }

    #[test]
    fn test_create_item_accepts_valid_input() {
        let input = CreateItem {
            name: "Widget".to_string(),
            description: Some("A widget".to_string()),
            price: Some(10.0),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_item_rejects_empty_name() {
        assert!(create_input("").validate().is_err());
    }

    #[test]
    fn test_create_item_rejects_overlong_name() {
        assert!(create_input(&"a".repeat(101)).validate().is_err());
        assert!(create_input(&"a".repeat(100)).validate().is_ok());
    }

    #[test]
    fn test_create_item_rejects_overlong_description() {
        let mut input = create_input("Widget");
        input.description = Some("d".repeat(501));
        assert!(input.validate().is_err());

        input.description = Some("d".repeat(500));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_item_rejects_negative_price() {
        let mut input = create_input("Widget");
        input.price = Some(-0.01);
        assert!(input.validate().is_err());

        input.price = Some(0.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_update_item_skips_absent_fields() {
        let update = UpdateItem::default();
        assert!(update.is_empty());
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_item_validates_supplied_fields() {
        let update = UpdateItem {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UpdateItem {
            price: Some(-5.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_apply_update_touches_only_supplied_fields() {
        let mut item = Item::new(1, CreateItem {
            name: "Widget".to_string(),
            description: Some("original".to_string()),
            price: Some(10.0),
        });
        let before = item.updated_at;

        item.apply_update(UpdateItem {
            price: Some(9.99),
            ..Default::default()
        });

        assert_eq!(item.name, "Widget");
        assert_eq!(item.description.as_deref(), Some("original"));
        assert_eq!(item.price, Some(9.99));
        assert!(item.updated_at >= before);
    }

    #[test]
    fn test_item_filter_defaults() {
        let filter = ItemFilter::default();
        assert_eq!(filter.skip, 0);
        assert_eq!(filter.limit, 100);
    }
}
