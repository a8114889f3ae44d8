//! User services - Gestione utenti (route protette)

use crate::core::{AppError, AppState, Identity, ResourceId, ValidJson};
use crate::dtos::{CreateUserDTO, UpdateUserDTO, UserDTO};
use crate::services::auth::AuthError;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use axum_macros::debug_handler;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, identity), fields(by = %identity.username))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> Result<Json<Vec<UserDTO>>, AppError> {
    debug!("Listing users");
    let users = state.user.read_all().await?;
    info!("Found {} users", users.len());
    Ok(Json(users.into_iter().map(UserDTO::from).collect()))
}

/// Stesso percorso della registrazione: la password passa sempre dall'hash
#[instrument(skip(state, identity, body), fields(by = %identity.username))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ValidJson(body): ValidJson<CreateUserDTO>,
) -> Result<(StatusCode, Json<UserDTO>), AppError> {
    let user = state.auth().register(body).await?;
    Ok((StatusCode::CREATED, Json(UserDTO::from(user))))
}

#[instrument(skip(state, identity), fields(by = %identity.username))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ResourceId(id): ResourceId,
) -> Result<Json<UserDTO>, AppError> {
    let user = state.user.read(&id).await?.ok_or_else(|| {
        warn!("User {} not found", id);
        AppError::not_found("User not found")
    })?;
    Ok(Json(UserDTO::from(user)))
}

#[debug_handler]
#[instrument(skip(state, identity, body), fields(by = %identity.username))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ResourceId(id): ResourceId,
    ValidJson(body): ValidJson<UpdateUserDTO>,
) -> Result<Json<UserDTO>, AppError> {
    let user = state
        .auth()
        .update_user(id, body)
        .await
        .map_err(|e| match e {
            AuthError::Persistence(sqlx::Error::RowNotFound) => {
                AppError::not_found("User not found")
            }
            other => other.into(),
        })?;
    info!("User {} updated", id);
    Ok(Json(UserDTO::from(user)))
}

#[instrument(skip(state, identity), fields(by = %identity.username))]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    ResourceId(id): ResourceId,
) -> Result<Json<Value>, AppError> {
    state
        .user
        .delete(&id)
        .await
        .map_err(|e| AppError::from_sqlx(e, "User not found"))?;
    info!("User {} deleted", id);
    Ok(Json(json!({ "message": "User deleted" })))
}
