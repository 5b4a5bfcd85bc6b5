use std::sync::Arc;

use crate::config::DatabaseProvider;
use crate::services::ItemService;
use crate::stores::ItemStore;

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once at startup and shared across the API
/// layer. The connection provider is the only long-lived shared resource;
/// its lifecycle is tied to process start/stop, not per-request.
pub struct AppData {
    pub provider: Arc<DatabaseProvider>,
    pub item_service: Arc<ItemService>,
}

impl AppData {
    /// Wire up stores and services around an initialized provider
    pub fn init(provider: DatabaseProvider) -> Self {
        tracing::debug!("Initializing AppData...");

        let provider = Arc::new(provider);
        let item_store = Arc::new(ItemStore::new());
        let item_service = Arc::new(ItemService::new(item_store));

        tracing::debug!("AppData initialization complete");

        Self {
            provider,
            item_service,
        }
    }
}
