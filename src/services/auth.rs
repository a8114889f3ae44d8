//! Auth services - Registrazione, login e cambio credenziali
//!
//! `AuthService` tiene insieme hash delle password, emissione dei token e
//! persistenza utenti; gli handler HTTP in fondo al file sono solo adattatori.

use crate::core::{
    AppError, AppState, CredentialCodec, CredentialError, Identity, TokenCodec, TokenError,
    ValidJson,
};
use crate::dtos::{
    CreateUserDTO, LoginDTO, LoginResponseDTO, NewUser, UpdateUserDTO, UserChanges, UserDTO,
};
use crate::entities::User;
use crate::repositories::UserStore;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no user with this username")]
    UnknownUser,

    #[error("invalid password")]
    InvalidCredentials,

    #[error(transparent)]
    Hashing(#[from] CredentialError),

    #[error(transparent)]
    Signing(#[from] TokenError),

    #[error("persistence failure: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            // stesso messaggio per username e password sbagliati
            AuthError::UnknownUser | AuthError::InvalidCredentials => {
                AppError::unauthorized("Invalid credentials")
            }
            AuthError::Hashing(CredentialError::TooLong(_)) => {
                AppError::bad_request("Password too long")
            }
            AuthError::Hashing(e) => {
                error!("Credential failure: {}", e);
                AppError::internal_server_error("Internal server error")
            }
            AuthError::Signing(e) => {
                error!("Token failure: {}", e);
                AppError::internal_server_error("Internal server error")
            }
            AuthError::Persistence(e) => AppError::from(e),
        }
    }
}

pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    credentials: &'a CredentialCodec,
    tokens: &'a TokenCodec,
}

impl<'a> AuthService<'a> {
    pub fn new(
        users: &'a dyn UserStore,
        credentials: &'a CredentialCodec,
        tokens: &'a TokenCodec,
    ) -> Self {
        Self {
            users,
            credentials,
            tokens,
        }
    }

    /// Salva un nuovo utente con la password sostituita dal suo hash.
    ///
    /// Uno username duplicato arriva come `Persistence`, come ogni altro errore del database.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn register(&self, user: CreateUserDTO) -> Result<User, AuthError> {
        let password_hash = self.credentials.hash(&user.password)?;

        let new_user = NewUser {
            inn: user.inn,
            username: user.username,
            password_hash,
            is_active: user.is_active,
            is_admin: user.is_admin,
        };

        let created = self.users.create(&new_user).await.map_err(|e| {
            warn!("Failed to persist user: {}", e);
            AuthError::Persistence(e)
        })?;
        info!(id = created.id, "User registered");
        Ok(created)
    }

    /// Verifica le credenziali e restituisce l'utente con un token nuovo
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String), AuthError> {
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!("Login failed: unknown username");
                return Err(AuthError::UnknownUser);
            }
        };

        if !self.credentials.verify(password, &user.password_hash)? {
            warn!("Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&Identity {
            id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
        })?;

        info!(id = user.id, "User logged in");
        Ok((user, token))
    }

    /// Aggiornamento parziale; una password nuova viene ri-hashata
    #[instrument(skip(self, changes))]
    pub async fn update_user(&self, id: i32, changes: UpdateUserDTO) -> Result<User, AuthError> {
        let password_hash = changes
            .password
            .as_deref()
            .map(|password| self.credentials.hash(password))
            .transpose()?;

        let changes = UserChanges {
            inn: changes.inn,
            username: changes.username,
            password_hash,
            is_active: changes.is_active,
            is_admin: changes.is_admin,
        };

        Ok(self.users.update(&id, &changes).await?)
    }
}

pub async fn register_user(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<CreateUserDTO>, // JSON body
) -> Result<(StatusCode, Json<UserDTO>), AppError> {
    let created_user = state.auth().register(body).await?;
    Ok((StatusCode::CREATED, Json(UserDTO::from(created_user))))
}

pub async fn login_user(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<LoginDTO>, // JSON body
) -> Result<Json<LoginResponseDTO>, AppError> {
    let (user, token) = state.auth().login(&body.username, &body.password).await?;
    Ok(Json(LoginResponseDTO {
        user: UserDTO::from(user),
        token,
    }))
}
