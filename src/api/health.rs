use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::config::DatabaseProvider;
use crate::types::dto::common::HealthResponse;

/// Health check API
pub struct HealthApi {
    provider: Arc<DatabaseProvider>,
}

impl HealthApi {
    pub fn new(provider: Arc<DatabaseProvider>) -> Self {
        Self { provider }
    }
}

/// API tags for health endpoints
#[derive(Tags)]
enum ApiTags {
    /// Health check endpoints
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Liveness probe
    ///
    /// Reflects database reachability as a boolean; never errors.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        let ok = self.provider.check_health().await;
        Json(HealthResponse { ok })
    }
}
