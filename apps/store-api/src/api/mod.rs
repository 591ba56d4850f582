//! API routes module
//!
//! All routes are mounted at the root by `axum_helpers::create_router`.

pub mod catalog;
pub mod health;
pub mod root;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(root::router())
        .merge(catalog::router(state))
        .merge(health::router(state.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::server::ServerConfig;
    use domain_catalog::DATABASE_UNAVAILABLE;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn unconfigured() -> AppState {
        AppState {
            config: Config {
                environment: Environment::Development,
                server: ServerConfig::default(),
                mongodb: None,
            },
            mongo_client: None,
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_catalog_without_database_reports_unavailable() {
        let app = routes(&unconfigured());

        let response = app
            .clone()
            .oneshot(Request::get("/products").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], DATABASE_UNAVAILABLE);

        let response = app
            .oneshot(Request::get("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["connection_status"], "Not Connected");
    }

    #[tokio::test]
    async fn test_full_router_serves_docs_and_404() {
        let app = temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            axum_helpers::create_router::<crate::openapi::ApiDoc>(routes(&unconfigured()))
        })
        .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
