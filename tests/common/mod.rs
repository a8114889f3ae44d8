//! Helper condivisi dai test di integrazione
//!
//! Gli store in memoria implementano gli stessi trait dei repository MySQL,
//! così i test HTTP girano senza database.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::HeaderValue;
use axum_test::TestServer;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use terminal_server::core::{AppState, CredentialCodec, Identity, TokenCodec};
use terminal_server::dtos::{
    CreateFiscalModuleDTO, CreateTerminalDTO, NewUser, UpdateFiscalModuleDTO, UpdateTerminalDTO,
    UserChanges,
};
use terminal_server::entities::{FiscalModule, Terminal, User};
use terminal_server::repositories::{FiscalModuleStore, TerminalStore, UserStore};

pub const TEST_SECRET: &[u8] = b"ilmiobellissimosegretochevaassolutamentecambiato";

// ============================================================
// Store in memoria
// ============================================================

#[derive(Default)]
pub struct MemoryUserStore {
    rows: DashMap<i32, User>,
    next_id: AtomicI32,
}

impl MemoryUserStore {
    fn next_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn username_taken(&self, username: &str, except: Option<i32>) -> bool {
        self.rows
            .iter()
            .any(|row| row.username == username && Some(row.id) != except)
    }
}

fn duplicate_username() -> sqlx::Error {
    sqlx::Error::Protocol("Duplicate entry for key 'uq_users_username'".into())
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, data: &NewUser) -> Result<User, sqlx::Error> {
        if self.username_taken(&data.username, None) {
            return Err(duplicate_username());
        }
        let user = User {
            id: self.next_id(),
            inn: data.inn.clone(),
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            is_active: data.is_active,
            is_admin: data.is_admin,
        };
        self.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn read(&self, id: &i32) -> Result<Option<User>, sqlx::Error> {
        Ok(self.rows.get(id).map(|row| row.value().clone()))
    }

    async fn read_all(&self) -> Result<Vec<User>, sqlx::Error> {
        let mut users: Vec<User> = self.rows.iter().map(|row| row.value().clone()).collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn update(&self, id: &i32, data: &UserChanges) -> Result<User, sqlx::Error> {
        if let Some(username) = &data.username {
            if self.username_taken(username, Some(*id)) {
                return Err(duplicate_username());
            }
        }
        let mut row = self.rows.get_mut(id).ok_or(sqlx::Error::RowNotFound)?;
        data.apply_to(&mut row);
        Ok(row.clone())
    }

    async fn delete(&self, id: &i32) -> Result<(), sqlx::Error> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self
            .rows
            .iter()
            .find(|row| row.username == username)
            .map(|row| row.value().clone()))
    }
}

#[derive(Default)]
pub struct MemoryFiscalModuleStore {
    rows: DashMap<i32, FiscalModule>,
    next_id: AtomicI32,
}

#[async_trait]
impl FiscalModuleStore for MemoryFiscalModuleStore {
    async fn create(&self, data: &CreateFiscalModuleDTO) -> Result<FiscalModule, sqlx::Error> {
        let module = FiscalModule {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            factory_number: data.factory_number.clone(),
            fiscal_number: data.fiscal_number.clone(),
            user_id: data.user_id,
        };
        self.rows.insert(module.id, module.clone());
        Ok(module)
    }

    async fn read(&self, id: &i32) -> Result<Option<FiscalModule>, sqlx::Error> {
        Ok(self.rows.get(id).map(|row| row.value().clone()))
    }

    async fn read_all(&self) -> Result<Vec<FiscalModule>, sqlx::Error> {
        let mut modules: Vec<FiscalModule> = self.rows.iter().map(|row| row.value().clone()).collect();
        modules.sort_by_key(|module| module.id);
        Ok(modules)
    }

    async fn update(
        &self,
        id: &i32,
        data: &UpdateFiscalModuleDTO,
    ) -> Result<FiscalModule, sqlx::Error> {
        let mut row = self.rows.get_mut(id).ok_or(sqlx::Error::RowNotFound)?;
        data.apply_to(&mut row);
        Ok(row.clone())
    }

    async fn delete(&self, id: &i32) -> Result<(), sqlx::Error> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or(sqlx::Error::RowNotFound)
    }
}

#[derive(Default)]
pub struct MemoryTerminalStore {
    rows: DashMap<i32, Terminal>,
    next_id: AtomicI32,
}

#[async_trait]
impl TerminalStore for MemoryTerminalStore {
    async fn create(&self, data: &CreateTerminalDTO) -> Result<Terminal, sqlx::Error> {
        let terminal = Terminal {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            inn: data.inn.clone(),
            company_name: data.company_name.clone(),
            address: data.address.clone(),
            cash_register_number: data.cash_register_number.clone(),
            module_number: data.module_number.clone(),
            assembly_number: data.assembly_number.clone(),
            last_request_date: data.last_request_date,
            database_update_date: data.database_update_date,
            status: data.status.clone(),
            user_id: data.user_id,
            free_record_balance: data.free_record_balance,
        };
        self.rows.insert(terminal.id, terminal.clone());
        Ok(terminal)
    }

    async fn read(&self, id: &i32) -> Result<Option<Terminal>, sqlx::Error> {
        Ok(self.rows.get(id).map(|row| row.value().clone()))
    }

    async fn read_all(&self) -> Result<Vec<Terminal>, sqlx::Error> {
        let mut terminals: Vec<Terminal> = self.rows.iter().map(|row| row.value().clone()).collect();
        terminals.sort_by_key(|terminal| terminal.id);
        Ok(terminals)
    }

    async fn update(&self, id: &i32, data: &UpdateTerminalDTO) -> Result<Terminal, sqlx::Error> {
        let mut row = self.rows.get_mut(id).ok_or(sqlx::Error::RowNotFound)?;
        data.apply_to(&mut row);
        Ok(row.clone())
    }

    async fn delete(&self, id: &i32) -> Result<(), sqlx::Error> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or(sqlx::Error::RowNotFound)
    }
}

// ============================================================
// Stato, server e token
// ============================================================

/// Crea un AppState per i test, con store in memoria vuoti
///
/// # Returns
/// Arc<AppState> configurato con il JWT secret di test e bcrypt a costo minimo
pub fn create_test_state() -> Arc<AppState> {
    Arc::new(AppState {
        user: Arc::new(MemoryUserStore::default()),
        fiscal: Arc::new(MemoryFiscalModuleStore::default()),
        terminal: Arc::new(MemoryTerminalStore::default()),
        credentials: CredentialCodec::with_cost(4),
        tokens: TokenCodec::new(TEST_SECRET),
    })
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = terminal_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT token valido per 24 ore, firmato con il segreto di test
pub fn create_test_jwt(user_id: i32, username: &str) -> String {
    TokenCodec::new(TEST_SECRET)
        .issue(&Identity {
            id: user_id,
            username: username.to_string(),
            is_admin: false,
        })
        .expect("Failed to create JWT token")
}

/// Valore dell'header `Authorization` per il token dato
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("valid header value")
}

/// Header `Authorization` pronto per un utente di test qualsiasi
pub fn auth_header() -> HeaderValue {
    bearer(&create_test_jwt(1, "alice"))
}

/// Registra un utente tramite l'API e restituisce il suo token di login
pub async fn register_and_login(server: &TestServer, username: &str, password: &str) -> String {
    server
        .post("/api/auth/register")
        .json(&serde_json::json!({ "username": username, "password": password }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

// ============================================================
// Cattura dei log
// ============================================================

/// Writer in memoria per `tracing_subscriber::fmt`, condiviso fra i thread
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Installa un subscriber DEBUG che scrive qui, per il thread corrente
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
