use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

pub const DATABASE_UNAVAILABLE: &str =
    "Database not available. Check DATABASE_URL and DATABASE_NAME environment variables.";

/// Failures raised by a [`DocumentStore`](crate::store::DocumentStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or could not complete the operation. Carries the
    /// backend's own error text.
    #[error("{0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{}", DATABASE_UNAVAILABLE)]
    DatabaseUnavailable,

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::DatabaseUnavailable => {
                AppError::InternalServerError(DATABASE_UNAVAILABLE.to_string())
            }
            CatalogError::Validation(errors) => AppError::ValidationError(errors),
            CatalogError::Store(e) => AppError::InternalServerError(e.to_string()),
            CatalogError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Internal(err.to_string())
    }
}
