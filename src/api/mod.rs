// API layer - HTTP endpoints
pub mod health;
pub mod items;
pub mod middleware;

use std::sync::Arc;

pub use health::HealthApi;
pub use items::ItemsApi;
pub use middleware::RequestId;

use poem::middleware::{NormalizePath, TrailingSlash};
use poem::{EndpointExt, Route};
use poem_openapi::error::ParseRequestPayloadError;
use poem_openapi::OpenApiService;

use crate::app_data::AppData;
use crate::errors::ItemApiError;

/// Compose the HTTP application: typed API at the root, Swagger UI under /swagger
pub fn build_app(app_data: Arc<AppData>) -> Route {
    let health_api = HealthApi::new(Arc::clone(&app_data.provider));
    let items_api = ItemsApi::new(
        Arc::clone(&app_data.provider),
        Arc::clone(&app_data.item_service),
    );

    let api_service = OpenApiService::new(
        (health_api, items_api),
        "Items API",
        env!("CARGO_PKG_VERSION"),
    );
    let ui = api_service.swagger_ui();

    // poem-openapi drops trailing slashes when registering routes, so the
    // declared `/items/` paths are served as `/items`; trim trailing slashes
    // from incoming requests so the spec's `/items/` URLs still match.
    // For `Result<T, E>` handler returns, poem-openapi only honours a
    // `bad_request_handler` declared on the Ok type, so the one on
    // `ItemApiError` never runs; catch payload schema violations here and
    // route them through the same 422 mapping.
    Route::new().nest("/swagger", ui).nest(
        "/",
        api_service
            .with(NormalizePath::new(TrailingSlash::Trim))
            .catch_error(|err: ParseRequestPayloadError| async move {
                ItemApiError::validation_failed(err.to_string())
            }),
    )
}
