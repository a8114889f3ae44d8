//! TerminalRepository - Repository MySQL per i terminali

use super::TerminalStore;
use crate::dtos::{CreateTerminalDTO, UpdateTerminalDTO};
use crate::entities::Terminal;
use async_trait::async_trait;
use sqlx::{Error, MySqlPool};

const SELECT_TERMINAL: &str = "SELECT id, inn, company_name, address, cash_register_number, \
    module_number, assembly_number, last_request_date, database_update_date, status, user_id, \
    free_record_balance FROM terminals";

pub struct TerminalRepository {
    connection_pool: MySqlPool,
}

impl TerminalRepository {
    pub fn new(connection_pool: MySqlPool) -> TerminalRepository {
        Self { connection_pool }
    }
}

#[async_trait]
impl TerminalStore for TerminalRepository {
    async fn create(&self, data: &CreateTerminalDTO) -> Result<Terminal, Error> {
        let result = sqlx::query(
            "INSERT INTO terminals (inn, company_name, address, cash_register_number, module_number, \
             assembly_number, last_request_date, database_update_date, status, user_id, free_record_balance) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.inn)
        .bind(&data.company_name)
        .bind(&data.address)
        .bind(&data.cash_register_number)
        .bind(&data.module_number)
        .bind(&data.assembly_number)
        .bind(data.last_request_date)
        .bind(data.database_update_date)
        .bind(&data.status)
        .bind(data.user_id)
        .bind(data.free_record_balance)
        .execute(&self.connection_pool)
        .await?;

        Ok(Terminal {
            id: result.last_insert_id() as i32,
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
        })
    }

    async fn read(&self, id: &i32) -> Result<Option<Terminal>, Error> {
        sqlx::query_as::<_, Terminal>(&format!("{SELECT_TERMINAL} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }

    async fn read_all(&self) -> Result<Vec<Terminal>, Error> {
        sqlx::query_as::<_, Terminal>(&format!("{SELECT_TERMINAL} ORDER BY id"))
            .fetch_all(&self.connection_pool)
            .await
    }

    async fn update(&self, id: &i32, data: &UpdateTerminalDTO) -> Result<Terminal, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let mut terminal =
            sqlx::query_as::<_, Terminal>(&format!("{SELECT_TERMINAL} WHERE id = ? FOR UPDATE"))
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(Error::RowNotFound)?;
        data.apply_to(&mut terminal);

        sqlx::query(
            "UPDATE terminals SET inn = ?, company_name = ?, address = ?, cash_register_number = ?, \
             module_number = ?, assembly_number = ?, last_request_date = ?, database_update_date = ?, \
             status = ?, user_id = ?, free_record_balance = ? WHERE id = ?",
        )
        .bind(&terminal.inn)
        .bind(&terminal.company_name)
        .bind(&terminal.address)
        .bind(&terminal.cash_register_number)
        .bind(&terminal.module_number)
        .bind(&terminal.assembly_number)
        .bind(terminal.last_request_date)
        .bind(terminal.database_update_date)
        .bind(&terminal.status)
        .bind(terminal.user_id)
        .bind(terminal.free_record_balance)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(terminal)
    }

    async fn delete(&self, id: &i32) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM terminals WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }
        Ok(())
    }
}
