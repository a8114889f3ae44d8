//! Terminal DTOs - Data Transfer Objects per terminali

use super::INN_PATTERN;
use crate::entities::Terminal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO per creare un nuovo terminale (senza id)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateTerminalDTO {
    #[validate(
        length(min = 1, message = "INN is required"),
        regex(path = *INN_PATTERN, message = "INN must be 9 to 14 digits")
    )]
    pub inn: String,

    #[validate(length(min = 1, max = 255, message = "Company name must be between 1 and 255 characters"))]
    pub company_name: String,

    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub cash_register_number: String,
    #[serde(default)]
    pub module_number: String,
    #[serde(default)]
    pub assembly_number: String,

    pub last_request_date: Option<DateTime<Utc>>,
    pub database_update_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: String,

    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "Free record balance cannot be negative"))]
    pub free_record_balance: i32,
}

/// DTO per aggiornare un terminale (campi opzionali)
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateTerminalDTO {
    #[validate(
        length(min = 1, message = "INN is required"),
        regex(path = *INN_PATTERN, message = "INN must be 9 to 14 digits")
    )]
    pub inn: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Company name must be between 1 and 255 characters"))]
    pub company_name: Option<String>,

    pub address: Option<String>,
    pub cash_register_number: Option<String>,
    pub module_number: Option<String>,
    pub assembly_number: Option<String>,
    pub last_request_date: Option<DateTime<Utc>>,
    pub database_update_date: Option<DateTime<Utc>>,
    pub status: Option<String>,

    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: Option<i32>,

    #[validate(range(min = 0, message = "Free record balance cannot be negative"))]
    pub free_record_balance: Option<i32>,
}

impl UpdateTerminalDTO {
    pub fn apply_to(&self, terminal: &mut Terminal) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut terminal.inn, &self.inn);
        set(&mut terminal.company_name, &self.company_name);
        set(&mut terminal.address, &self.address);
        set(&mut terminal.cash_register_number, &self.cash_register_number);
        set(&mut terminal.module_number, &self.module_number);
        set(&mut terminal.assembly_number, &self.assembly_number);
        set(&mut terminal.status, &self.status);
        set(&mut terminal.user_id, &self.user_id);
        set(&mut terminal.free_record_balance, &self.free_record_balance);
        if self.last_request_date.is_some() {
            terminal.last_request_date = self.last_request_date;
        }
        if self.database_update_date.is_some() {
            terminal.database_update_date = self.database_update_date;
        }
    }
}
