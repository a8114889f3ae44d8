//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod auth;
pub mod fiscal_module;
pub mod terminal;
pub mod user;

// Re-exports per facilitare l'import
pub use auth::{AuthError, AuthService, login_user, register_user};
pub use fiscal_module::{
    create_fiscal_module, delete_fiscal_module, get_fiscal_module, list_fiscal_modules,
    update_fiscal_module,
};
pub use terminal::{create_terminal, delete_terminal, get_terminal, list_terminals, update_terminal};
pub use user::{create_user, delete_user, get_user, list_users, update_user};

use axum::{http::StatusCode, response::IntoResponse};

/// Root endpoint - health check
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
