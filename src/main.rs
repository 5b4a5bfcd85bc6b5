use std::sync::Arc;

use poem::middleware::{Cors, SizeLimit};
use poem::{listener::TcpListener, EndpointExt, Server};

use items_backend::api;
use items_backend::api::RequestId;
use items_backend::app_data::AppData;
use items_backend::config::{init_logging, BootstrapSettings, DatabaseProvider};

// Requests with bodies beyond this are rejected with 413
const MAX_BODY_SIZE: usize = 1024 * 1024;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let settings = BootstrapSettings::from_env().expect("Failed to load bootstrap settings");

    let provider = DatabaseProvider::connect(settings.database_url())
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database: {}", settings.database_url());

    if settings.auto_create_schema() {
        provider
            .ensure_schema()
            .await
            .expect("Failed to create database schema");
        tracing::info!("Database schema bootstrap completed");
    }

    let app_data = Arc::new(AppData::init(provider));

    let app = api::build_app(Arc::clone(&app_data))
        .with(Cors::new().allow_origin(settings.cors_allow_origin()))
        .with(SizeLimit::new(MAX_BODY_SIZE))
        .with(RequestId);

    tracing::info!("Starting server on http://{}", settings.server_address());
    tracing::info!(
        "Swagger UI available at http://{}/swagger",
        settings.server_address()
    );

    Server::new(TcpListener::bind(settings.server_address()))
        .run_with_graceful_shutdown(
            app,
            async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown signal received");
            },
            None,
        )
        .await?;

    if let Err(e) = app_data.provider.shutdown().await {
        tracing::error!("Failed to shut down connection provider: {}", e);
    }

    Ok(())
}
