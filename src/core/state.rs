//! Application State - Stato globale dell'applicazione
//!
//! Contiene i repository, i codec di autenticazione e nient'altro:
//! dopo l'avvio è di sola lettura e viene condiviso fra le richieste via `Arc`.

use crate::core::{CredentialCodec, TokenCodec};
use crate::repositories::{
    FiscalModuleRepository, FiscalModuleStore, TerminalRepository, TerminalStore, UserRepository,
    UserStore,
};
use crate::services::AuthService;
use sqlx::MySqlPool;
use std::sync::Arc;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: Arc<dyn UserStore>,

    /// Repository per la gestione dei moduli fiscali
    pub fiscal: Arc<dyn FiscalModuleStore>,

    /// Repository per la gestione dei terminali
    pub terminal: Arc<dyn TerminalStore>,

    /// Hash delle password
    pub credentials: CredentialCodec,

    /// Emissione/validazione dei token, costruito una volta con il segreto condiviso
    pub tokens: TokenCodec,
}

impl AppState {
    /// Crea una nuova istanza di AppState con i repository MySQL
    /// sul pool fornito e il segreto JWT.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni MySQL condiviso
    /// * `jwt_secret` - Chiave segreta per la firma dei token JWT
    pub fn new(pool: MySqlPool, jwt_secret: &[u8]) -> Self {
        Self {
            user: Arc::new(UserRepository::new(pool.clone())),
            fiscal: Arc::new(FiscalModuleRepository::new(pool.clone())),
            terminal: Arc::new(TerminalRepository::new(pool)),
            credentials: CredentialCodec::new(),
            tokens: TokenCodec::new(jwt_secret),
        }
    }

    /// Servizio di autenticazione legato a questo stato
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.user.as_ref(), &self.credentials, &self.tokens)
    }
}
