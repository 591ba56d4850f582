pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Returned for every error response:
/// - `code`: Integer error code for logging/monitoring (e.g., 1001)
/// - `error`: Machine-readable error identifier (e.g., "VALIDATION_ERROR")
/// - `message`: Human-readable error message
/// - `details`: Optional additional error details (e.g., validation errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1001,
///   "error": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "details": {
///     "price": [{"code": "range", "message": "price must be >= 0", "params": {"min": 0.0, "value": -1.0}}]
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    /// Body parsed as JSON but did not match the expected shape.
    #[error("Invalid body: {message}")]
    InvalidBody {
        message: String,
        details: Option<Value>,
    },

    /// Query string did not match the expected parameters.
    #[error("Invalid query: {message}")]
    InvalidQuery {
        message: String,
        details: Option<Value>,
    },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Status code this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::ValidationError(_)
            | AppError::InvalidBody { .. }
            | AppError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, details, code) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidJson.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (e.body_text(), None, ErrorCode::InvalidJson)
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                (
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(validation_details(&e)),
                    ErrorCode::ValidationError,
                )
            }
            AppError::InvalidBody { message, details } => {
                tracing::info!(error_code = ErrorCode::InvalidJson.code(), "Invalid body: {}", message);
                (message, details, ErrorCode::InvalidJson)
            }
            AppError::InvalidQuery { message, details } => {
                tracing::info!(
                    error_code = ErrorCode::InvalidQuery.code(),
                    "Invalid query: {}",
                    message
                );
                (message, details, ErrorCode::InvalidQuery)
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (msg, None, ErrorCode::NotFound)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (msg, None, ErrorCode::InternalError)
            }
        };

        (status, Json(ErrorResponse::new(code, message, details))).into_response()
    }
}

/// Render validator errors as `{field: [{code, message, params}]}`.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let entries: Vec<Value> = errors
                .iter()
                .map(|err| {
                    json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), Value::Array(entries))
        })
        .collect::<Map<_, _>>();

    Value::Object(details)
}

/// Pull the offending field out of a serde message such as
/// "missing field `title`" or "unknown field `colour`, expected one of ...".
pub fn field_from_serde_message(message: &str) -> Option<&str> {
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    let field = &message[start..start + len];
    (!field.is_empty()).then_some(field)
}

/// Build `{field: [{code, message}]}` details for a single field.
pub fn field_details(field: &str, code: &str, message: &str) -> Value {
    let mut details = Map::new();
    details.insert(
        field.to_string(),
        json!([{ "code": code, "message": message }]),
    );
    Value::Object(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name must not be empty"))]
        name: String,
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_field_from_serde_message() {
        assert_eq!(
            field_from_serde_message("missing field `title`"),
            Some("title")
        );
        assert_eq!(
            field_from_serde_message("unknown field `colour`, expected one of `name`, `image`"),
            Some("colour")
        );
        assert_eq!(
            field_from_serde_message("invalid type: string \"x\", expected f64"),
            None
        );
    }

    #[test]
    fn test_field_details() {
        let details = field_details("price", "invalid_type", "expected f64");
        assert_eq!(details["price"][0]["code"], "invalid_type");
        assert_eq!(details["price"][0]["message"], "expected f64");
    }

    #[tokio::test]
    async fn test_validation_error_response_shape() {
        let errors = Sample {
            name: String::new(),
        }
        .validate()
        .unwrap_err();

        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], 1001);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["name"][0]["code"], "length");
        assert_eq!(body["details"]["name"][0]["message"], "name must not be empty");
    }

    #[tokio::test]
    async fn test_internal_error_keeps_message() {
        let response = AppError::InternalServerError("Database not available".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "Database not available");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_invalid_query_response() {
        let response = AppError::InvalidQuery {
            message: "limit must be >= 1".into(),
            details: Some(json!({"limit": [{"code": "range"}]})),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "INVALID_QUERY");
        assert_eq!(body["details"]["limit"][0]["code"], "range");
    }
}
