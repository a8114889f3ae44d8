//! FiscalModule entity - Modulo fiscale associato a un utente

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, FromRow)]
pub struct FiscalModule {
    pub id: i32,
    pub factory_number: String,
    pub fiscal_number: String,
    pub user_id: i32,
}
