//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod fiscal_module;
pub mod terminal;
pub mod user;

use crate::core::credentials::MAX_PASSWORD_BYTES;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

// Re-exports per facilitare l'import
pub use fiscal_module::{CreateFiscalModuleDTO, UpdateFiscalModuleDTO};
pub use terminal::{CreateTerminalDTO, UpdateTerminalDTO};
pub use user::{
    CreateUserDTO, LoginDTO, LoginResponseDTO, NewUser, UpdateUserDTO, UserChanges, UserDTO,
};

lazy_static! {
    /// INN (codice fiscale): vuoto oppure da 9 a 14 cifre
    pub(crate) static ref INN_PATTERN: Regex =
        Regex::new(r"^([0-9]{9,14})?$").expect("INN pattern is a valid regex");
}

pub const MIN_PASSWORD_BYTES: usize = 6;

/// Lunghezza della password in byte (non in caratteri), entro il limite di bcrypt
pub(crate) fn validate_password_length(password: &str) -> Result<(), ValidationError> {
    if (MIN_PASSWORD_BYTES..=MAX_PASSWORD_BYTES).contains(&password.len()) {
        return Ok(());
    }

    let mut err = ValidationError::new("password_length");
    err.message = Some(Cow::Owned(format!(
        "Password must be between {} and {} bytes",
        MIN_PASSWORD_BYTES, MAX_PASSWORD_BYTES
    )));
    Err(err)
}
