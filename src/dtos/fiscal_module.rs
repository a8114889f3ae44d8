//! FiscalModule DTOs - Data Transfer Objects per moduli fiscali

use crate::entities::FiscalModule;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO per creare un nuovo modulo fiscale (senza id)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateFiscalModuleDTO {
    #[validate(length(min = 1, max = 64, message = "Factory number must be between 1 and 64 characters"))]
    pub factory_number: String,

    #[validate(length(min = 1, max = 64, message = "Fiscal number must be between 1 and 64 characters"))]
    pub fiscal_number: String,

    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i32,
}

/// DTO per aggiornare un modulo fiscale (campi opzionali)
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateFiscalModuleDTO {
    #[validate(length(min = 1, max = 64, message = "Factory number must be between 1 and 64 characters"))]
    pub factory_number: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Fiscal number must be between 1 and 64 characters"))]
    pub fiscal_number: Option<String>,

    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: Option<i32>,
}

impl UpdateFiscalModuleDTO {
    pub fn apply_to(&self, module: &mut FiscalModule) {
        if let Some(factory_number) = &self.factory_number {
            module.factory_number = factory_number.clone();
        }
        if let Some(fiscal_number) = &self.fiscal_number {
            module.fiscal_number = fiscal_number.clone();
        }
        if let Some(user_id) = self.user_id {
            module.user_id = user_id;
        }
    }
}
