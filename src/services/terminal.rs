//! Terminal services - CRUD dei terminali (route protette)

use crate::core::{AppError, AppState, Identity, ResourceId, ValidJson};
use crate::dtos::{CreateTerminalDTO, UpdateTerminalDTO};
use crate::entities::Terminal;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use axum_macros::debug_handler;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, identity), fields(by = %identity.username))]
pub async fn list_terminals(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> Result<Json<Vec<Terminal>>, AppError> {
    debug!("Listing terminals");
    Ok(Json(state.terminal.read_all().await?))
}

#[instrument(skip(state, identity, body), fields(by = %identity.username))]
pub async fn create_terminal(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ValidJson(body): ValidJson<CreateTerminalDTO>,
) -> Result<(StatusCode, Json<Terminal>), AppError> {
    let terminal = state.terminal.create(&body).await?;
    info!("Terminal {} created", terminal.id);
    Ok((StatusCode::CREATED, Json(terminal)))
}

#[instrument(skip(state, identity), fields(by = %identity.username))]
pub async fn get_terminal(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ResourceId(id): ResourceId,
) -> Result<Json<Terminal>, AppError> {
    state
        .terminal
        .read(&id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            warn!("Terminal {} not found", id);
            AppError::not_found("Terminal not found")
        })
}

#[debug_handler]
#[instrument(skip(state, identity, body), fields(by = %identity.username))]
pub async fn update_terminal(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ResourceId(id): ResourceId,
    ValidJson(body): ValidJson<UpdateTerminalDTO>,
) -> Result<Json<Terminal>, AppError> {
    let terminal = state
        .terminal
        .update(&id, &body)
        .await
        .map_err(|e| AppError::from_sqlx(e, "Terminal not found"))?;
    info!("Terminal {} updated", id);
    Ok(Json(terminal))
}

#[instrument(skip(state, identity), fields(by = %identity.username))]
pub async fn delete_terminal(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ResourceId(id): ResourceId,
) -> Result<Json<Value>, AppError> {
    state
        .terminal
        .delete(&id)
        .await
        .map_err(|e| AppError::from_sqlx(e, "Terminal not found"))?;
    info!("Terminal {} deleted", id);
    Ok(Json(json!({ "message": "Terminal deleted" })))
}
