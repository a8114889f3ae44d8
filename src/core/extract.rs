//! Extractor che trasformano i rifiuti di axum in `AppError`
//!
//! Così ogni errore di input esce come `{"error": ...}` con 400,
//! senza il testo interno del parser.

use crate::core::AppError;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::Validate;

/// Body JSON deserializzato e validato con `validator`
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                warn!("Rejected request body: {}", rejection.body_text());
                AppError::bad_request("Invalid request payload")
            })?;

        value.validate()?;
        Ok(Self(value))
    }
}

/// Id numerico dal path (`/{id}`)
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub i32);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                warn!("Rejected path id: {}", rejection.body_text());
                AppError::bad_request("Invalid id")
            })?;

        Ok(Self(id))
    }
}
