//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, Config, auth, config};
pub use services::root;

use axum::{
    Router,
    http::{Method, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::{any::Any, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    use crate::core::authentication_middleware;

    // tutto ciò che sta qui dentro richiede un token valido
    let protected = Router::new()
        .nest("/users", configure_user_routes())
        .nest("/fiscal", configure_fiscal_routes())
        .nest("/terminal", configure_terminal_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authentication_middleware,
        ));

    let api = Router::new()
        .nest("/auth", configure_auth_routes())
        .merge(protected);

    let app = Router::new().route("/", get(root)).nest("/api", api);

    with_http_layers(app).with_state(state)
}

/// Layer HTTP comuni; il recupero dai panic è il più esterno
pub fn with_http_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // l'ultimo layer aggiunto è il più esterno
    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Configura le routes di autenticazione (login, register)
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
}

/// Configura le routes per la gestione degli utenti
fn configure_user_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// Configura le routes per la gestione dei moduli fiscali
fn configure_fiscal_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_fiscal_modules).post(create_fiscal_module))
        .route(
            "/{id}",
            get(get_fiscal_module)
                .put(update_fiscal_module)
                .delete(delete_fiscal_module),
        )
}

/// Configura le routes per la gestione dei terminali
fn configure_terminal_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_terminals).post(create_terminal))
        .route(
            "/{id}",
            get(get_terminal).put(update_terminal).delete(delete_terminal),
        )
}

/// Unico punto di recupero dai panic degli handler
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        *message
    } else {
        "unknown panic payload"
    };

    error!("Handler panicked: {}", detail);
    AppError::internal_server_error("Internal server error").into_response()
}
