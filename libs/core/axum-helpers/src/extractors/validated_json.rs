//! JSON extractor with automatic validation using the validator crate.

use crate::errors::{AppError, field_details, field_from_serde_message};
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// The body is read as JSON first and then mapped onto `T` with the failing
/// path tracked, so shape errors (missing field, unknown field, wrong type,
/// `null` in a required field) are reported per field rather than as an
/// opaque rejection. Rule violations from `Validate` follow.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateCategory {
///     #[validate(length(min = 1))]
///     name: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateCategory>) -> String {
///     format!("Creating category: {}", payload.name)
/// }
///
/// let app = Router::new().route("/categories", post(create));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state).await?;

        let data: T = serde_path_to_error::deserialize(raw).map_err(|err| {
            let path = err.path().to_string();
            let message = err.into_inner().to_string();
            let code = shape_error_code(&message);
            let field = error_field(code, &message, &path);
            AppError::InvalidBody {
                details: Some(field_details(&field, code, &message)),
                message,
            }
        })?;

        data.validate()?;

        Ok(ValidatedJson(data))
    }
}

fn shape_error_code(message: &str) -> &'static str {
    if message.starts_with("missing field") {
        "missing_field"
    } else if message.starts_with("unknown field") {
        "unknown_field"
    } else {
        "invalid_type"
    }
}

/// Field a shape error belongs to.
///
/// Missing and unknown fields are named in the message; the path points at
/// their parent. Other errors are located by the path. `body` when neither
/// names a field.
fn error_field(code: &str, message: &str, path: &str) -> String {
    let at_path = (!path.is_empty() && path != ".").then(|| path.to_string());
    let named = match code {
        "missing_field" | "unknown_field" => field_from_serde_message(message).map(str::to_string),
        _ => None,
    };

    named.or(at_path).unwrap_or_else(|| "body".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    #[serde(deny_unknown_fields)]
    struct Payload {
        #[validate(length(min = 1, message = "name must not be empty"))]
        name: String,
        #[validate(range(min = 0.0))]
        price: f64,
    }

    async fn handler(ValidatedJson(payload): ValidatedJson<Payload>) -> String {
        payload.name
    }

    async fn send(body: &str) -> (StatusCode, Value) {
        let app = Router::new().route("/", post(handler));
        let response = app
            .oneshot(
                HttpRequest::post("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_valid_payload_passes() {
        let (status, _) = send(r#"{"name":"shoes","price":10}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_field_reports_field() {
        let (status, body) = send(r#"{"price":10}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_JSON");
        assert_eq!(body["details"]["name"][0]["code"], "missing_field");
    }

    #[tokio::test]
    async fn test_unknown_field_reports_field() {
        let (status, body) = send(r#"{"name":"a","price":1,"colour":"red"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["colour"][0]["code"], "unknown_field");
    }

    #[tokio::test]
    async fn test_wrong_type_is_bad_request() {
        let (status, body) = send(r#"{"name":"a","price":"cheap"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_JSON");
        assert_eq!(body["details"]["price"][0]["code"], "invalid_type");
    }

    #[tokio::test]
    async fn test_null_required_field_reports_field() {
        let (status, body) = send(r#"{"name":null,"price":1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["name"][0]["code"], "invalid_type");
    }

    #[tokio::test]
    async fn test_non_object_body_reports_body() {
        let (status, body) = send(r#""shoes""#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["body"][0]["code"], "invalid_type");
    }

    #[test]
    fn test_error_field() {
        assert_eq!(error_field("missing_field", "missing field `name`", "."), "name");
        assert_eq!(error_field("invalid_type", "invalid type: string", "price"), "price");
        assert_eq!(error_field("invalid_type", "invalid type: sequence", "."), "body");
    }

    #[tokio::test]
    async fn test_rule_violation_is_validation_error() {
        let (status, body) = send(r#"{"name":"","price":-1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["details"]["name"].is_array());
        assert!(body["details"]["price"].is_array());
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let (status, body) = send("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_JSON");
    }
}
