//! Repository traits
//!
//! Interfacce verso la persistenza. Sono object-safe (`async-trait`) così
//! `AppState` può tenere `Arc<dyn ...>` e i test possono sostituire MySQL
//! con implementazioni in memoria.

use crate::dtos::{
    CreateFiscalModuleDTO, CreateTerminalDTO, NewUser, UpdateFiscalModuleDTO, UpdateTerminalDTO,
    UserChanges,
};
use crate::entities::{FiscalModule, Terminal, User};
use async_trait::async_trait;

/// Persistenza degli utenti
///
/// # Errors
/// * `sqlx::Error::RowNotFound` - `update`/`delete` su un id inesistente
/// * `sqlx::Error::Database` - vincoli violati (es. username duplicato)
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserisce l'utente; l'id lo assegna il database
    async fn create(&self, data: &NewUser) -> Result<User, sqlx::Error>;

    async fn read(&self, id: &i32) -> Result<Option<User>, sqlx::Error>;

    async fn read_all(&self) -> Result<Vec<User>, sqlx::Error>;

    async fn update(&self, id: &i32, data: &UserChanges) -> Result<User, sqlx::Error>;

    async fn delete(&self, id: &i32) -> Result<(), sqlx::Error>;

    /// Lo username è univoco
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;
}

/// Persistenza dei moduli fiscali
#[async_trait]
pub trait FiscalModuleStore: Send + Sync {
    async fn create(&self, data: &CreateFiscalModuleDTO) -> Result<FiscalModule, sqlx::Error>;

    async fn read(&self, id: &i32) -> Result<Option<FiscalModule>, sqlx::Error>;

    async fn read_all(&self) -> Result<Vec<FiscalModule>, sqlx::Error>;

    async fn update(
        &self,
        id: &i32,
        data: &UpdateFiscalModuleDTO,
    ) -> Result<FiscalModule, sqlx::Error>;

    async fn delete(&self, id: &i32) -> Result<(), sqlx::Error>;
}

/// Persistenza dei terminali
#[async_trait]
pub trait TerminalStore: Send + Sync {
    async fn create(&self, data: &CreateTerminalDTO) -> Result<Terminal, sqlx::Error>;

    async fn read(&self, id: &i32) -> Result<Option<Terminal>, sqlx::Error>;

    async fn read_all(&self) -> Result<Vec<Terminal>, sqlx::Error>;

    async fn update(&self, id: &i32, data: &UpdateTerminalDTO) -> Result<Terminal, sqlx::Error>;

    async fn delete(&self, id: &i32) -> Result<(), sqlx::Error>;
}
