//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella nel database.

pub mod fiscal_module;
pub mod terminal;
pub mod user;

// Re-exports per facilitare l'import
pub use fiscal_module::FiscalModule;
pub use terminal::Terminal;
pub use user::User;
