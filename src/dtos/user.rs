//! User DTOs - Data Transfer Objects per utenti e autenticazione

use super::{INN_PATTERN, validate_password_length};
use crate::entities::User;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Vista dell'utente verso il client: nessun materiale di credenziali
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserDTO {
    pub id: i32,
    pub inn: String,
    pub username: String,
    pub is_active: bool,
    pub is_admin: bool,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            inn: value.inn,
            username: value.username,
            is_active: value.is_active,
            is_admin: value.is_admin,
        }
    }
}

/// Body di registrazione / creazione utente (password in chiaro)
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDTO {
    #[serde(default)]
    #[validate(regex(path = *INN_PATTERN, message = "INN must be 9 to 14 digits"))]
    pub inn: String,

    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[validate(custom(function = "validate_password_length"))]
    pub password: String,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub is_admin: bool,
}

/// Aggiornamento parziale: i campi assenti restano invariati
#[derive(Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateUserDTO {
    #[validate(regex(path = *INN_PATTERN, message = "INN must be 9 to 14 digits"))]
    pub inn: Option<String>,

    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: Option<String>,

    #[validate(custom(function = "validate_password_length"))]
    pub password: Option<String>,

    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
}

/// Utente pronto per l'insert: la password è già stata sostituita dall'hash
#[derive(Debug, Clone)]
pub struct NewUser {
    pub inn: String,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
}

/// Modifiche da applicare a un utente esistente (hash già calcolato)
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub inn: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
}

impl UserChanges {
    /// Applica le modifiche presenti su `user`
    pub fn apply_to(&self, user: &mut User) {
        if let Some(inn) = &self.inn {
            user.inn = inn.clone();
        }
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(password_hash) = &self.password_hash {
            user.password_hash = password_hash.clone();
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(is_admin) = self.is_admin {
            user.is_admin = is_admin;
        }
    }
}

/// DTO per il login (solo username e password)
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct LoginDTO {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponseDTO {
    pub user: UserDTO,
    pub token: String,
}
