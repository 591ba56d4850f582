use axum_helpers::server::{ServiceInfo, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{Client, MongoConfig, connect_from_config_with_retry, connect_lazy};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SERVICE: ServiceInfo = ServiceInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

/// Connect with retry; if the deployment never answers, keep a lazily
/// connecting client so requests report the driver error themselves.
async fn connect(config: &MongoConfig) -> eyre::Result<Client> {
    match connect_from_config_with_retry(config, None).await {
        Ok(client) => {
            info!(database = %config.database, "Connected to MongoDB");
            Ok(client)
        }
        Err(e) => {
            warn!(error = %e, "MongoDB unreachable at startup; continuing with a lazy client");
            Ok(connect_lazy(config).await?)
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let mongo_client = match config.mongodb.as_ref() {
        Some(mongodb) => {
            info!("Connecting to MongoDB at {}", mongodb.redacted_url());
            Some(connect(mongodb).await?)
        }
        None => {
            warn!("DATABASE_URL or DATABASE_NAME not set; starting without a database");
            None
        }
    };

    let state = AppState {
        config,
        mongo_client,
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    // Merge health endpoints
    let app = router.merge(health_router(SERVICE));

    info!("Starting Store API with graceful shutdown (30s timeout)");

    let AppState {
        config,
        mongo_client,
    } = state;

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        if let Some(client) = mongo_client {
            info!("Shutting down: closing MongoDB connections");
            client.shutdown().await;
            info!("MongoDB connection closed successfully");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Store API shutdown complete");
    Ok(())
}
