//! Terminal entity - Terminale di pagamento (punto cassa)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow)]
pub struct Terminal {
    pub id: i32,
    pub inn: String,
    pub company_name: String,
    pub address: String,
    pub cash_register_number: String,
    pub module_number: String,
    pub assembly_number: String,
    pub last_request_date: Option<DateTime<Utc>>,
    pub database_update_date: Option<DateTime<Utc>>,
    pub status: String,
    pub user_id: i32,
    pub free_record_balance: i32,
}
