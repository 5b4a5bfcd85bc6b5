use std::fmt;

use poem_openapi::{payload::Json, ApiResponse};

use crate::errors::internal::{InternalError, ItemError};
use crate::types::dto::common::ErrorResponse;

/// Wire-level error type for item endpoints
///
/// The API layer is the only place where internal conditions are mapped to
/// HTTP status codes.
#[derive(ApiResponse, Debug)]
#[oai(bad_request_handler = "bad_request_handler")]
pub enum ItemApiError {
    /// Requested item does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Request payload failed validation
    #[oai(status = 422)]
    ValidationFailed(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

/// Remap request schema violations from poem-openapi's default 400 to 422
fn bad_request_handler(err: poem::Error) -> ItemApiError {
    ItemApiError::validation_failed(err.to_string())
}

impl ItemApiError {
    /// Create a NotFound error
    pub fn not_found(id: &str) -> Self {
        ItemApiError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message: format!("Item '{}' not found", id),
            status_code: 404,
        }))
    }

    /// Create a ValidationFailed error
    pub fn validation_failed(message: String) -> Self {
        ItemApiError::ValidationFailed(Json(ErrorResponse {
            error: "validation_failed".to_string(),
            message,
            status_code: 422,
        }))
    }

    /// Create a generic internal server error
    ///
    /// Always returns a generic message without exposing internal details.
    fn internal_server_error() -> Self {
        ItemApiError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Convert InternalError to ItemApiError
    ///
    /// This is the explicit conversion point from internal errors to API
    /// errors. Infrastructure error details are logged but not exposed to
    /// clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Item(ItemError::NotFound(id)) => {
                tracing::debug!("Item not found: {}", id);
                Self::not_found(id)
            }
            InternalError::Item(ItemError::ValidationFailed(message)) => {
                tracing::debug!("Item validation failed: {}", message);
                Self::validation_failed(message.clone())
            }
            InternalError::Database(_) => {
                tracing::error!("Storage error in item operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ItemApiError::NotFound(json) => json.0.message.clone(),
            ItemApiError::ValidationFailed(json) => json.0.message.clone(),
            ItemApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ItemApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
