use std::sync::Arc;

use sea_orm::ConnectionTrait;

use crate::errors::internal::ItemError;
use crate::errors::InternalError;
use crate::stores::{ItemPatch, ItemStore, ListParams};
use crate::types::db::item;

/// Thin orchestration over the item store
///
/// Validates input shape beyond storage-level checks and converts the
/// store's not-found outcomes into domain errors. Infrastructure errors
/// pass through unchanged; the API layer maps them to status codes.
pub struct ItemService {
    store: Arc<ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<ItemStore>) -> Self {
        Self { store }
    }

    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
        description: Option<String>,
    ) -> Result<item::Model, InternalError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ItemError::ValidationFailed("name must not be empty".to_string()).into());
        }

        self.store.create(conn, name.to_string(), description).await
    }

    pub async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> Result<item::Model, InternalError> {
        self.store
            .get(conn, id)
            .await?
            .ok_or_else(|| ItemError::NotFound(id.to_string()).into())
    }

    pub async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        params: ListParams,
    ) -> Result<Vec<item::Model>, InternalError> {
        self.store.list(conn, params).await
    }

    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
        patch: ItemPatch,
    ) -> Result<item::Model, InternalError> {
        if patch.is_empty() {
            return Err(ItemError::ValidationFailed("no fields to update".to_string()).into());
        }

        self.store
            .update(conn, id, patch)
            .await?
            .ok_or_else(|| ItemError::NotFound(id.to_string()).into())
    }

    pub async fn delete<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> Result<(), InternalError> {
        if self.store.delete(conn, id).await? {
            Ok(())
        } else {
            Err(ItemError::NotFound(id.to_string()).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseProvider;
    use sea_orm::{Database, DatabaseConnection};

    async fn setup_test_service() -> (DatabaseConnection, ItemService) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        let provider = DatabaseProvider::from_connection(db.clone());
        provider
            .ensure_schema()
            .await
            .expect("Failed to create schema");

        (db, ItemService::new(Arc::new(ItemStore::new())))
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let (db, service) = setup_test_service().await;

        let created = service
            .create(&db, "  padded  ", None)
            .await
            .expect("Failed to create item");

        assert_eq!(created.name, "padded");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let (db, service) = setup_test_service().await;

        let result = service.create(&db, "   ", None).await;

        match result {
            Err(InternalError::Item(ItemError::ValidationFailed(_))) => {}
            other => panic!("Expected ValidationFailed, got: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (db, service) = setup_test_service().await;

        let result = service.get(&db, "no-such-id").await;

        match result {
            Err(InternalError::Item(ItemError::NotFound(id))) => assert_eq!(id, "no-such-id"),
            other => panic!("Expected NotFound, got: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_update_rejects_empty_patch() {
        let (db, service) = setup_test_service().await;

        let created = service
            .create(&db, "name", None)
            .await
            .expect("Failed to create item");

        let result = service.update(&db, &created.id, ItemPatch::default()).await;

        match result {
            Err(InternalError::Item(ItemError::ValidationFailed(message))) => {
                assert!(message.contains("no fields"));
            }
            other => panic!("Expected ValidationFailed, got: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (db, service) = setup_test_service().await;

        let patch = ItemPatch {
            name: Some("x".to_string()),
            description: None,
        };
        let result = service.update(&db, "no-such-id", patch).await;

        match result {
            Err(InternalError::Item(ItemError::NotFound(_))) => {}
            other => panic!("Expected NotFound, got: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found_every_time() {
        let (db, service) = setup_test_service().await;

        for _ in 0..2 {
            let result = service.delete(&db, "no-such-id").await;
            match result {
                Err(InternalError::Item(ItemError::NotFound(_))) => {}
                other => panic!("Expected NotFound, got: {:?}", other.map(|_| ())),
            }
        }
    }

    #[tokio::test]
    async fn test_delete_existing_succeeds() {
        let (db, service) = setup_test_service().await;

        let created = service
            .create(&db, "doomed", None)
            .await
            .expect("Failed to create item");

        service
            .delete(&db, &created.id)
            .await
            .expect("Delete failed");

        let result = service.get(&db, &created.id).await;
        assert!(matches!(
            result,
            Err(InternalError::Item(ItemError::NotFound(_)))
        ));
    }
}
