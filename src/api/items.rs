use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, ApiResponse, OpenApi, Tags};

use crate::config::DatabaseProvider;
use crate::errors::ItemApiError;
use crate::services::ItemService;
use crate::stores::{ItemPatch, ListParams};
use crate::types::dto::items::{CreateItemRequest, ItemResponse, UpdateItemRequest};

/// Items API
///
/// Stateless per request: each handler acquires a fresh unit-of-work
/// session from the provider, invokes the service, and commits on success.
/// Dropping the session on an error path rolls back.
pub struct ItemsApi {
    provider: Arc<DatabaseProvider>,
    service: Arc<ItemService>,
}

impl ItemsApi {
    pub fn new(provider: Arc<DatabaseProvider>, service: Arc<ItemService>) -> Self {
        Self { provider, service }
    }
}

/// API tags for item endpoints
#[derive(Tags)]
enum ApiTags {
    /// Item management endpoints
    Items,
}

#[derive(ApiResponse)]
pub enum CreateItemResponse {
    /// Item created
    #[oai(status = 201)]
    Created(Json<ItemResponse>),
}

#[derive(ApiResponse)]
pub enum DeleteItemResponse {
    /// Item deleted
    #[oai(status = 204)]
    Deleted,
}

#[OpenApi]
impl ItemsApi {
    /// Create a new item
    #[oai(path = "/items/", method = "post", tag = "ApiTags::Items")]
    async fn create_item(
        &self,
        body: Json<CreateItemRequest>,
    ) -> Result<CreateItemResponse, ItemApiError> {
        let session = self
            .provider
            .acquire_session()
            .await
            .map_err(ItemApiError::from_internal_error)?;

        let item = self
            .service
            .create(&session, &body.name, body.description.clone())
            .await
            .map_err(ItemApiError::from_internal_error)?;

        self.provider
            .commit(session)
            .await
            .map_err(ItemApiError::from_internal_error)?;

        Ok(CreateItemResponse::Created(Json(ItemResponse::from(item))))
    }

    /// List items, newest first
    ///
    /// Supports pagination via `limit` (1-100, default 50) and `offset`,
    /// and an optional case-insensitive name filter `q`.
    #[oai(path = "/items/", method = "get", tag = "ApiTags::Items")]
    async fn list_items(
        &self,
        limit: Query<Option<u64>>,
        offset: Query<Option<u64>>,
        q: Query<Option<String>>,
    ) -> Result<Json<Vec<ItemResponse>>, ItemApiError> {
        let session = self
            .provider
            .acquire_session()
            .await
            .map_err(ItemApiError::from_internal_error)?;

        let params = ListParams {
            limit: limit.0,
            offset: offset.0,
            q: q.0,
        };
        let items = self
            .service
            .list(&session, params)
            .await
            .map_err(ItemApiError::from_internal_error)?;

        self.provider
            .commit(session)
            .await
            .map_err(ItemApiError::from_internal_error)?;

        Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
    }

    /// Fetch a single item by id
    #[oai(path = "/items/:id", method = "get", tag = "ApiTags::Items")]
    async fn get_item(&self, id: Path<String>) -> Result<Json<ItemResponse>, ItemApiError> {
        let session = self
            .provider
            .acquire_session()
            .await
            .map_err(ItemApiError::from_internal_error)?;

        let item = self
            .service
            .get(&session, &id.0)
            .await
            .map_err(ItemApiError::from_internal_error)?;

        self.provider
            .commit(session)
            .await
            .map_err(ItemApiError::from_internal_error)?;

        Ok(Json(ItemResponse::from(item)))
    }

    /// Partially update an item
    ///
    /// Only the supplied fields overwrite existing values.
    #[oai(path = "/items/:id", method = "patch", tag = "ApiTags::Items")]
    async fn update_item(
        &self,
        id: Path<String>,
        body: Json<UpdateItemRequest>,
    ) -> Result<Json<ItemResponse>, ItemApiError> {
        let session = self
            .provider
            .acquire_session()
            .await
            .map_err(ItemApiError::from_internal_error)?;

        let patch = ItemPatch {
            name: body.0.name,
            description: body.0.description,
        };
        let item = self
            .service
            .update(&session, &id.0, patch)
            .await
            .map_err(ItemApiError::from_internal_error)?;

        self.provider
            .commit(session)
            .await
            .map_err(ItemApiError::from_internal_error)?;

        Ok(Json(ItemResponse::from(item)))
    }

    /// Delete an item
    #[oai(path = "/items/:id", method = "delete", tag = "ApiTags::Items")]
    async fn delete_item(&self, id: Path<String>) -> Result<DeleteItemResponse, ItemApiError> {
        let session = self
            .provider
            .acquire_session()
            .await
            .map_err(ItemApiError::from_internal_error)?;

        self.service
            .delete(&session, &id.0)
            .await
            .map_err(ItemApiError::from_internal_error)?;

        self.provider
            .commit(session)
            .await
            .map_err(ItemApiError::from_internal_error)?;

        Ok(DeleteItemResponse::Deleted)
    }
}
