use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::MongoConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

async fn client_options(config: &MongoConfig) -> Result<ClientOptions, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(options)
}

/// Connect using a MongoConfig and verify the deployment answers.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "store");
/// let client = connect_from_config(&config).await?;
/// ```
#[instrument(skip(config), fields(url = %config.redacted_url()))]
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!("Attempting to connect to MongoDB");

    let client = Client::with_options(client_options(config).await?)?;

    client
        .list_database_names()
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// [`connect_from_config`] with exponential backoff.
///
/// `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> Result<Client, MongoError> {
    retry_with_backoff(
        "mongodb connect",
        || connect_from_config(config),
        retry_config.unwrap_or_default(),
    )
    .await
}

/// Build a client without contacting the server.
///
/// The driver connects on first use, so operations on the returned client
/// surface connection failures individually.
#[instrument(skip(config), fields(url = %config.redacted_url()))]
pub async fn connect_lazy(config: &MongoConfig) -> Result<Client, MongoError> {
    let client = Client::with_options(client_options(config).await?)?;
    info!("Created MongoDB client without verifying connectivity");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_lazy_does_not_need_a_server() {
        let config = MongoConfig::with_database("mongodb://127.0.0.1:1", "store");
        assert!(connect_lazy(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let config = MongoConfig::with_database("postgres://localhost", "store");
        assert!(matches!(
            connect_lazy(&config).await,
            Err(MongoError::Mongo(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_from_config() {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let config = MongoConfig::with_database(url, "test");
        assert!(connect_from_config(&config).await.is_ok());
    }
}
