use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{AppError, ErrorCode, ErrorResponse};

pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found";

/// Fallback handler for unknown routes.
pub async fn not_found() -> Response {
    AppError::NotFound(NOT_FOUND_MESSAGE.to_string()).into_response()
}

/// Fallback for a known route hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    let body = Json(ErrorResponse::new(
        ErrorCode::MethodNotAllowed,
        ErrorCode::MethodNotAllowed.default_message(),
        None,
    ));

    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}
