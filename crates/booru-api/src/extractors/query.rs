//! Query string extractor.
//!
//! Listing handlers take `QueryParams<PageQuery>` for the window and a
//! separate `QueryParams<_>` for entity filters; each ignores the other's
//! keys.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use booru_core::error::AppError;

use crate::error::ApiError;

/// Deserialized query parameters.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::validation(format!("Invalid query: {}", rejection.body_text()))
            })?;
        Ok(QueryParams(value))
    }
}
