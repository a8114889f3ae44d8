//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Hash delle password
//! - Token JWT e middleware di autenticazione
//! - Configurazione
//! - Gestione errori ed extractor
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{AuthRejection, Claims, Identity, TokenCodec, TokenError, authentication_middleware};
pub use config::Config;
pub use credentials::{CredentialCodec, CredentialError};
pub use error::AppError;
pub use extract::{ResourceId, ValidJson};
pub use state::AppState;
