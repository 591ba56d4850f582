use mongodb::{Client, bson::doc};
use std::time::Instant;

/// Outcome of a MongoDB ping.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Driver error text when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    /// `Ok(())` when healthy, otherwise the error text.
    pub fn into_result(self) -> Result<(), String> {
        if self.healthy {
            Ok(())
        } else {
            Err(self.message.unwrap_or_else(|| "unhealthy".to_string()))
        }
    }
}

/// Ping the deployment through the `admin` database.
///
/// # Example
/// ```ignore
/// let status = database::mongodb::check_health(&client).await;
/// if !status.healthy {
///     tracing::warn!("MongoDB unhealthy: {:?}", status.message);
/// }
/// ```
pub async fn check_health(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = client.database("admin").run_command(doc! { "ping": 1 }).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        let ok = HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: 1,
        };
        assert!(ok.into_result().is_ok());

        let down = HealthStatus {
            healthy: false,
            message: Some("connection refused".to_string()),
            response_time_ms: 5,
        };
        assert_eq!(down.into_result().unwrap_err(), "connection refused");
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_check_health() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let status = check_health(&client).await;
        assert!(status.healthy);
        assert!(status.message.is_none());
    }
}
