use std::sync::Arc;

use poem::test::TestClient;
use poem::Route;

use items_backend::api;
use items_backend::app_data::AppData;
use items_backend::config::DatabaseProvider;

/// Build the full HTTP application over a fresh in-memory database
pub async fn setup_app() -> (TestClient<Route>, Arc<AppData>) {
    let provider = DatabaseProvider::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    provider
        .ensure_schema()
        .await
        .expect("Failed to create schema");

    let app_data = Arc::new(AppData::init(provider));
    let app = api::build_app(Arc::clone(&app_data));

    (TestClient::new(app), app_data)
}
