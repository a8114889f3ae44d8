//! Credential codec - hashing e verifica delle password con bcrypt
//!
//! La password in chiaro non viene mai salvata né loggata: esce da qui solo
//! l'hash, che contiene già salt e costo.

use bcrypt::{BcryptError, DEFAULT_COST};
use thiserror::Error;
use tracing::{debug, instrument};

/// Lunghezza massima (in byte) della password in chiaro.
///
/// Il buffer di bcrypt è di 72 byte compreso il terminatore NUL.
pub const MAX_PASSWORD_BYTES: usize = 71;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password exceeds 71 bytes ({0} with terminator)")]
    TooLong(usize),

    #[error("password hashing failed: {0}")]
    Hashing(BcryptError),
}

impl From<BcryptError> for CredentialError {
    fn from(err: BcryptError) -> Self {
        match err {
            BcryptError::Truncation(len) => Self::TooLong(len),
            other => Self::Hashing(other),
        }
    }
}

/// Hash one-way delle password con costo fisso
#[derive(Debug, Clone, Copy)]
pub struct CredentialCodec {
    cost: u32,
}

impl CredentialCodec {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Costo esplicito; usato nei test per non pagare il costo di default
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Calcola un hash salato della password.
    ///
    /// Fallisce se la password supera `MAX_PASSWORD_BYTES`.
    #[instrument(skip_all, fields(cost = self.cost))]
    pub fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        let hashed = bcrypt::non_truncating_hash(plaintext, self.cost)?;
        debug!("Password hashed");
        Ok(hashed)
    }

    /// Verifica la password contro l'hash salvato.
    ///
    /// Una password sbagliata dà `Ok(false)`; l'errore è riservato a un hash corrotto.
    #[instrument(skip_all)]
    pub fn verify(&self, plaintext: &str, credential: &str) -> Result<bool, CredentialError> {
        match bcrypt::non_truncating_verify(plaintext, credential) {
            Ok(matches) => Ok(matches),
            // nessun hash salvato può derivare da una password oltre il limite
            Err(BcryptError::Truncation(_)) => Ok(false),
            Err(err) => Err(CredentialError::Hashing(err)),
        }
    }
}

impl Default for CredentialCodec {
    fn default() -> Self {
        Self::new()
    }
}
