//! Request extractors that reject with the JSON error body.

use super::error::ApiError;
use crate::domain::model::UserId;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

pub const REQUESTER_HEADER: &str = "x-user-id";

/// Identity of the caller, taken from the `x-user-id` header
#[derive(Debug, Clone, Copy)]
pub struct Requester(pub UserId);

impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(REQUESTER_HEADER).ok_or_else(|| {
            ApiError::bad_request(format!("missing {} header", REQUESTER_HEADER))
        })?;
        let value = header.to_str().map_err(|_| {
            ApiError::bad_request(format!("{} header is not ASCII", REQUESTER_HEADER))
        })?;

        Ok(Requester(value.trim().parse()?))
    }
}

/// `axum::Json` whose rejection is an [`ApiError`]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// `axum::extract::Query` whose rejection is an [`ApiError`]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ApiQuery(value))
    }
}
