//! Fiscal module services - CRUD dei moduli fiscali (route protette)

use crate::core::{AppError, AppState, Identity, ResourceId, ValidJson};
use crate::dtos::{CreateFiscalModuleDTO, UpdateFiscalModuleDTO};
use crate::entities::FiscalModule;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use axum_macros::debug_handler;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, identity), fields(by = %identity.username))]
pub async fn list_fiscal_modules(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> Result<Json<Vec<FiscalModule>>, AppError> {
    debug!("Listing fiscal modules");
    Ok(Json(state.fiscal.read_all().await?))
}

#[instrument(skip(state, identity, body), fields(by = %identity.username))]
pub async fn create_fiscal_module(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ValidJson(body): ValidJson<CreateFiscalModuleDTO>,
) -> Result<(StatusCode, Json<FiscalModule>), AppError> {
    let module = state.fiscal.create(&body).await?;
    info!("Fiscal module {} created", module.id);
    Ok((StatusCode::CREATED, Json(module)))
}

#[instrument(skip(state, identity), fields(by = %identity.username))]
pub async fn get_fiscal_module(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ResourceId(id): ResourceId,
) -> Result<Json<FiscalModule>, AppError> {
    state
        .fiscal
        .read(&id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            warn!("Fiscal module {} not found", id);
            AppError::not_found("Fiscal module not found")
        })
}

#[debug_handler]
#[instrument(skip(state, identity, body), fields(by = %identity.username))]
pub async fn update_fiscal_module(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ResourceId(id): ResourceId,
    ValidJson(body): ValidJson<UpdateFiscalModuleDTO>,
) -> Result<Json<FiscalModule>, AppError> {
    let module = state
        .fiscal
        .update(&id, &body)
        .await
        .map_err(|e| AppError::from_sqlx(e, "Fiscal module not found"))?;
    info!("Fiscal module {} updated", id);
    Ok(Json(module))
}

#[instrument(skip(state, identity), fields(by = %identity.username))]
pub async fn delete_fiscal_module(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ResourceId(id): ResourceId,
) -> Result<Json<Value>, AppError> {
    state
        .fiscal
        .delete(&id)
        .await
        .map_err(|e| AppError::from_sqlx(e, "Fiscal module not found"))?;
    info!("Fiscal module {} deleted", id);
    Ok(Json(json!({ "message": "Fiscal module deleted" })))
}
