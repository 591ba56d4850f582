//! Query string extractor with automatic validation.

use crate::errors::{AppError, field_details};
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query extractor that validates the parsed parameters.
///
/// Parse failures become `INVALID_QUERY` with the offending parameter as the
/// detail key when it can be recovered; rule violations become
/// `VALIDATION_ERROR`.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let message = rejection.body_text();
                let param = parameter_from_rejection(&message).unwrap_or("query");
                AppError::InvalidQuery {
                    details: Some(field_details(param, "invalid", &message)),
                    message,
                }
            })?;

        params.validate()?;

        Ok(ValidatedQuery(params))
    }
}

/// "Failed to deserialize query string: limit: invalid digit found in string" -> "limit"
fn parameter_from_rejection(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("query string: ")?;
    let (param, _) = rest.split_once(':')?;
    let param = param.trim();
    (!param.is_empty() && !param.contains(' ')).then_some(param)
}
