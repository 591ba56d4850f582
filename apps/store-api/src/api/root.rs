//! Root and greeting endpoints

use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

pub const ROOT_MESSAGE: &str = "Store API running";
pub const HELLO_MESSAGE: &str = "Hello from the backend API!";

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
}

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    tag = "Root",
    responses((status = 200, description = "Service is running", body = MessageResponse))
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "Root",
    responses((status = 200, description = "Greeting", body = MessageResponse))
)]
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: HELLO_MESSAGE.to_string(),
    })
}
