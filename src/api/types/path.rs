//! `Path` extractor whose rejections use the API error envelope

use axum::{
    extract::{rejection::PathRejection, FromRequestParts},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiErrorType};

/// Drop-in for `axum::extract::Path`
#[derive(Debug, Clone, Copy, Default)]
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Path(value)),
            Err(rejection) => Err(rejection_error(rejection)),
        }
    }
}

fn rejection_error(rejection: PathRejection) -> ApiError {
    let status = rejection.status();
    let error_type = if status.is_server_error() {
        ApiErrorType::ServerError
    } else {
        ApiErrorType::InvalidRequestError
    };

    ApiError::new(
        status,
        error_type,
        format!("Invalid path parameter: {}", rejection.body_text()),
    )
    .with_code("path_parse_error")
}
