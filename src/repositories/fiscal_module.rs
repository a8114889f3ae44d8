//! FiscalModuleRepository - Repository MySQL per i moduli fiscali

use super::FiscalModuleStore;
use crate::dtos::{CreateFiscalModuleDTO, UpdateFiscalModuleDTO};
use crate::entities::FiscalModule;
use async_trait::async_trait;
use sqlx::{Error, MySqlPool};
use tracing::debug;

pub struct FiscalModuleRepository {
    connection_pool: MySqlPool,
}

impl FiscalModuleRepository {
    pub fn new(connection_pool: MySqlPool) -> FiscalModuleRepository {
        Self { connection_pool }
    }
}

#[async_trait]
impl FiscalModuleStore for FiscalModuleRepository {
    async fn create(&self, data: &CreateFiscalModuleDTO) -> Result<FiscalModule, Error> {
        let result = sqlx::query(
            "INSERT INTO fiscal_modules (factory_number, fiscal_number, user_id) VALUES (?, ?, ?)",
        )
        .bind(&data.factory_number)
        .bind(&data.fiscal_number)
        .bind(data.user_id)
        .execute(&self.connection_pool)
        .await?;

        let id = result.last_insert_id() as i32;
        debug!("Inserted fiscal module {}", id);

        Ok(FiscalModule {
            id,
            factory_number: data.factory_number.clone(),
            fiscal_number: data.fiscal_number.clone(),
            user_id: data.user_id,
        })
    }

    async fn read(&self, id: &i32) -> Result<Option<FiscalModule>, Error> {
        sqlx::query_as::<_, FiscalModule>(
            "SELECT id, factory_number, fiscal_number, user_id FROM fiscal_modules WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }

    async fn read_all(&self) -> Result<Vec<FiscalModule>, Error> {
        sqlx::query_as::<_, FiscalModule>(
            "SELECT id, factory_number, fiscal_number, user_id FROM fiscal_modules ORDER BY id",
        )
        .fetch_all(&self.connection_pool)
        .await
    }

    async fn update(&self, id: &i32, data: &UpdateFiscalModuleDTO) -> Result<FiscalModule, Error> {
        // la riga resta bloccata (FOR UPDATE) fino al commit
        let mut tx = self.connection_pool.begin().await?;

        let mut module = sqlx::query_as::<_, FiscalModule>(
            "SELECT id, factory_number, fiscal_number, user_id FROM fiscal_modules WHERE id = ? FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(Error::RowNotFound)?;
        data.apply_to(&mut module);

        sqlx::query(
            "UPDATE fiscal_modules SET factory_number = ?, fiscal_number = ?, user_id = ? WHERE id = ?",
        )
        .bind(&module.factory_number)
        .bind(&module.fiscal_number)
        .bind(module.user_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(module)
    }

    async fn delete(&self, id: &i32) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM fiscal_modules WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }
        Ok(())
    }
}
