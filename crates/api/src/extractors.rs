//! Request extractors whose rejections are problem-detail responses.
//!
//! Axum's stock `Json`, `Path` and `Query` reject with `text/plain` bodies.
//! These wrappers route every rejection through [`AppError`] instead.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use baralga_core::paging::PageParams;
use baralga_core::types::DbId;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::query::PageQuery;

/// JSON body that is deserialized and then validated.
///
/// Malformed JSON is a 400 [`AppError::BadRequest`]; a body that parses but
/// fails validation is a 400 validation error.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

/// A single `{id}` path segment parsed as a UUID.
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Uuid::parse_str(&raw)
            .map(IdPath)
            .map_err(|_| AppError::BadRequest(format!("Invalid id: {raw}")))
    }
}

/// Normalized page request taken from `?page=&size=`.
pub struct Paging(pub PageParams);

impl<S> FromRequestParts<S> for Paging
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Paging(query.into()))
    }
}
