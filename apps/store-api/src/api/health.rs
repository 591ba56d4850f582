//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - pings MongoDB when a client is configured
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Ready to serve"),
        (status = 503, description = "MongoDB did not answer")
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(client) = state.mongo_client.as_ref() {
        checks.push((
            "mongodb",
            Box::pin(async move { check_health(client).await.into_result() }),
        ));
    }

    run_health_checks(checks).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::server::ServerConfig;
    use database::mongodb::{MongoConfig, connect_lazy};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn config(mongodb: Option<MongoConfig>) -> Config {
        Config {
            environment: Environment::Development,
            server: ServerConfig::default(),
            mongodb,
        }
    }

    async fn ready(state: AppState) -> (StatusCode, Value) {
        let response = router(state)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ready_without_database() {
        let state = AppState {
            config: config(None),
            mongo_client: None,
        };

        let (status, body) = ready(state).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ready"}));
    }

    #[tokio::test]
    async fn test_not_ready_when_mongodb_unreachable() {
        let mut mongodb = MongoConfig::with_database("mongodb://127.0.0.1:1", "store");
        mongodb.server_selection_timeout_secs = 1;
        mongodb.connect_timeout_secs = 1;
        let client = connect_lazy(&mongodb).await.unwrap();

        let state = AppState {
            config: config(Some(mongodb)),
            mongo_client: Some(client),
        };

        let (status, body) = ready(state).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["mongodb"], "disconnected");
    }
}
