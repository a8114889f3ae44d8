//! User entity - Entità utente come salvata nel database

use sqlx::FromRow;

/// Riga della tabella `users`.
///
/// Non implementa `Serialize`: verso il client passa sempre da `UserDTO`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i32,
    pub inn: String,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
}
