use chrono::{DateTime, Utc};
use poem_openapi::Object;

use crate::types::db::item;

/// Request model for creating a new item
#[derive(Object, Debug)]
pub struct CreateItemRequest {
    /// Name of the item (1-200 characters)
    #[oai(validator(min_length = 1, max_length = 200))]
    pub name: String,

    /// Optional description of the item
    #[oai(validator(max_length = 1000))]
    pub description: Option<String>,
}

/// Request model for partially updating an item
///
/// Only the supplied fields overwrite existing values; omitted fields are
/// left untouched.
#[derive(Object, Debug, Default)]
pub struct UpdateItemRequest {
    /// New name for the item (1-200 characters)
    #[oai(validator(min_length = 1, max_length = 200))]
    pub name: Option<String>,

    /// New description for the item
    #[oai(validator(max_length = 1000))]
    pub description: Option<String>,
}

/// Response model representing an item
#[derive(Object, Debug)]
pub struct ItemResponse {
    /// Unique identifier for the item
    pub id: String,

    /// Name of the item
    pub name: String,

    /// Optional description of the item
    pub description: Option<String>,

    /// Timestamp when the item was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last modification
    pub updated_at: DateTime<Utc>,
}

impl From<item::Model> for ItemResponse {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
