use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::internal::ItemError;
use crate::errors::InternalError;
use crate::types::db::item;

pub const LIST_DEFAULT_LIMIT: u64 = 50;
pub const LIST_MIN_LIMIT: u64 = 1;
pub const LIST_MAX_LIMIT: u64 = 100;

/// Partial set of field updates for an item
///
/// A field that is `None` is left untouched by the merge.
#[derive(Debug, Default, Clone)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Pagination and filter parameters for listing items
#[derive(Debug, Default, Clone)]
pub struct ListParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub q: Option<String>,
}

/// Merge a patch into an existing item, returning the post-merge field values
///
/// Pure function: only supplied fields overwrite existing ones. The merged
/// name is trimmed and must not end up blank.
pub fn merge(
    existing: &item::Model,
    patch: ItemPatch,
) -> Result<(String, Option<String>), ItemError> {
    let name = patch
        .name
        .unwrap_or_else(|| existing.name.clone())
        .trim()
        .to_string();
    if name.is_empty() {
        return Err(ItemError::ValidationFailed(
            "name must not be empty".to_string(),
        ));
    }

    let description = patch.description.or_else(|| existing.description.clone());

    Ok((name, description))
}

/// Repository for CRUD operations on the items table
///
/// Stateless; every method operates on an injected session so the caller
/// controls the unit of work.
pub struct ItemStore;

impl ItemStore {
    pub fn new() -> Self {
        Self
    }

    /// Insert a new item with a server-assigned id and timestamps
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: String,
        description: Option<String>,
    ) -> Result<item::Model, InternalError> {
        let now = Utc::now();

        let new_item = item::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = new_item
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("create_item", e))?;

        Ok(created)
    }

    /// Fetch an item by id
    pub async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> Result<Option<item::Model>, InternalError> {
        item::Entity::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_item", e))
    }

    /// List items ordered by creation time descending
    ///
    /// `limit` is clamped to 1..=100 (default 50); `q` applies a
    /// case-insensitive substring filter on the name. The id is a secondary
    /// sort key so that pagination is deterministic when timestamps tie.
    pub async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        params: ListParams,
    ) -> Result<Vec<item::Model>, InternalError> {
        let limit = params
            .limit
            .unwrap_or(LIST_DEFAULT_LIMIT)
            .clamp(LIST_MIN_LIMIT, LIST_MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        let mut query = item::Entity::find();

        if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", q.to_lowercase());
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(item::Column::Name))).like(pattern),
            );
        }

        query
            .order_by_desc(item::Column::CreatedAt)
            .order_by_asc(item::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_items", e))
    }

    /// Merge a patch into an existing item and persist it
    ///
    /// Returns `Ok(None)` when no row exists for the id. `updated_at` is
    /// refreshed on every successful merge.
    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
        patch: ItemPatch,
    ) -> Result<Option<item::Model>, InternalError> {
        let existing = match self.get(conn, id).await? {
            Some(existing) => existing,
            None => return Ok(None),
        };

        let (name, description) = merge(&existing, patch)?;

        let updated = item::ActiveModel {
            id: Set(existing.id.clone()),
            name: Set(name),
            description: Set(description),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(conn)
        .await
        .map_err(|e| InternalError::database("update_item", e))?;

        Ok(Some(updated))
    }

    /// Hard-delete an item, reporting whether a row existed
    pub async fn delete<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> Result<bool, InternalError> {
        let result = item::Entity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_item", e))?;

        Ok(result.rows_affected == 1)
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseProvider;
    use sea_orm::{Database, DatabaseConnection};

    async fn setup_test_db() -> (DatabaseConnection, ItemStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        let provider = DatabaseProvider::from_connection(db.clone());
        provider
            .ensure_schema()
            .await
            .expect("Failed to create schema");

        (db, ItemStore::new())
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_equal_timestamps() {
        let (db, store) = setup_test_db().await;

        let created = store
            .create(&db, "A".to_string(), Some("B".to_string()))
            .await
            .expect("Failed to create item");

        assert!(!created.id.is_empty());
        assert_eq!(created.name, "A");
        assert_eq!(created.description.as_deref(), Some("B"));
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (db, store) = setup_test_db().await;

        let created = store
            .create(&db, "A".to_string(), Some("B".to_string()))
            .await
            .expect("Failed to create item");

        let fetched = store
            .get(&db, &created.id)
            .await
            .expect("Failed to get item")
            .expect("Item not found");

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let (db, store) = setup_test_db().await;

        let fetched = store
            .get(&db, "no-such-id")
            .await
            .expect("Failed to query item");

        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let (db, store) = setup_test_db().await;

        for i in 0..3 {
            store
                .create(&db, format!("item-{}", i), None)
                .await
                .expect("Failed to create item");
        }

        let items = store
            .list(&db, ListParams::default())
            .await
            .expect("Failed to list items");

        assert_eq!(items.len(), 3);
        for pair in items.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn test_list_pagination_pages_are_disjoint() {
        let (db, store) = setup_test_db().await;

        for i in 0..15 {
            store
                .create(&db, format!("item-{:02}", i), None)
                .await
                .expect("Failed to create item");
        }

        let first = store
            .list(
                &db,
                ListParams {
                    limit: Some(10),
                    offset: Some(0),
                    q: None,
                },
            )
            .await
            .expect("Failed to list first page");
        let second = store
            .list(
                &db,
                ListParams {
                    limit: Some(10),
                    offset: Some(10),
                    q: None,
                },
            )
            .await
            .expect("Failed to list second page");

        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 5);
        for item in &second {
            assert!(first.iter().all(|f| f.id != item.id));
        }
    }

    #[tokio::test]
    async fn test_list_limit_is_clamped() {
        let (db, store) = setup_test_db().await;

        for i in 0..3 {
            store
                .create(&db, format!("item-{}", i), None)
                .await
                .expect("Failed to create item");
        }

        // limit=0 is raised to the minimum of 1
        let items = store
            .list(
                &db,
                ListParams {
                    limit: Some(0),
                    offset: None,
                    q: None,
                },
            )
            .await
            .expect("Failed to list items");
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_search_is_case_insensitive() {
        let (db, store) = setup_test_db().await;

        store
            .create(&db, "Alpha".to_string(), None)
            .await
            .expect("Failed to create Alpha");
        store
            .create(&db, "Beta".to_string(), None)
            .await
            .expect("Failed to create Beta");

        let items = store
            .list(
                &db,
                ListParams {
                    limit: None,
                    offset: None,
                    q: Some("al".to_string()),
                },
            )
            .await
            .expect("Failed to search items");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Alpha");
    }

    #[tokio::test]
    async fn test_update_merges_only_supplied_fields() {
        let (db, store) = setup_test_db().await;

        let created = store
            .create(&db, "name".to_string(), Some("old".to_string()))
            .await
            .expect("Failed to create item");

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let updated = store
            .update(
                &db,
                &created.id,
                ItemPatch {
                    name: None,
                    description: Some("new".to_string()),
                },
            )
            .await
            .expect("Failed to update item")
            .expect("Item not found");

        assert_eq!(updated.name, "name");
        assert_eq!(updated.description.as_deref(), Some("new"));
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let (db, store) = setup_test_db().await;

        let result = store
            .update(
                &db,
                "no-such-id",
                ItemPatch {
                    name: Some("x".to_string()),
                    description: None,
                },
            )
            .await
            .expect("Update on missing id must not error");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let (db, store) = setup_test_db().await;

        let created = store
            .create(&db, "name".to_string(), None)
            .await
            .expect("Failed to create item");

        let result = store
            .update(
                &db,
                &created.id,
                ItemPatch {
                    name: Some("   ".to_string()),
                    description: None,
                },
            )
            .await;

        match result {
            Err(InternalError::Item(ItemError::ValidationFailed(_))) => {}
            other => panic!("Expected ValidationFailed, got: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let (db, store) = setup_test_db().await;

        let created = store
            .create(&db, "doomed".to_string(), None)
            .await
            .expect("Failed to create item");

        assert!(store.delete(&db, &created.id).await.expect("delete failed"));
        assert!(!store.delete(&db, &created.id).await.expect("delete failed"));
        assert!(store
            .get(&db, &created.id)
            .await
            .expect("get failed")
            .is_none());
    }

    #[test]
    fn test_merge_keeps_unsupplied_fields() {
        let now = Utc::now();
        let existing = item::Model {
            id: "id".to_string(),
            name: "name".to_string(),
            description: Some("desc".to_string()),
            created_at: now,
            updated_at: now,
        };

        let (name, description) = merge(
            &existing,
            ItemPatch {
                name: None,
                description: None,
            },
        )
        .expect("merge failed");

        assert_eq!(name, "name");
        assert_eq!(description.as_deref(), Some("desc"));
    }

    #[test]
    fn test_merge_trims_name() {
        let now = Utc::now();
        let existing = item::Model {
            id: "id".to_string(),
            name: "name".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        };

        let (name, _) = merge(
            &existing,
            ItemPatch {
                name: Some("  spaced  ".to_string()),
                description: None,
            },
        )
        .expect("merge failed");

        assert_eq!(name, "spaced");
    }

    #[test]
    fn test_merge_rejects_blank_name() {
        let now = Utc::now();
        let existing = item::Model {
            id: "id".to_string(),
            name: "name".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        };

        let result = merge(
            &existing,
            ItemPatch {
                name: Some("".to_string()),
                description: None,
            },
        );

        assert!(matches!(result, Err(ItemError::ValidationFailed(_))));
    }
}
