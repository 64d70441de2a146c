//! Path parameter extraction with JSON validation errors.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tasklane_core::error::CoreError;

use crate::error::AppError;

/// Deserializes path parameters, typically `Id` or `(Id, Id)` for nested routes.
///
/// Wraps [`Path`] so that a malformed UUID is reported as a 400
/// `VALIDATION_ERROR` body instead of axum's plain-text rejection.
#[derive(Debug)]
pub struct IdPath<T>(pub T);

impl<T, S> FromRequestParts<S> for IdPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(IdPath(value)),
            Err(rejection) => Err(AppError::Core(CoreError::Validation(
                rejection.body_text(),
            ))),
        }
    }
}
