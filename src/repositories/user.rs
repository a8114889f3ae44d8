//! UserRepository - Repository MySQL per la gestione degli utenti

use super::UserStore;
use crate::dtos::{NewUser, UserChanges};
use crate::entities::User;
use async_trait::async_trait;
use sqlx::{Error, MySqlPool};

const SELECT_USER: &str =
    "SELECT id, inn, username, password_hash, is_active, is_admin FROM users";

pub struct UserRepository {
    connection_pool: MySqlPool,
}

impl UserRepository {
    pub fn new(connection_pool: MySqlPool) -> UserRepository {
        Self { connection_pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, data: &NewUser) -> Result<User, Error> {
        let result = sqlx::query(
            "INSERT INTO users (inn, username, password_hash, is_active, is_admin) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&data.inn)
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(data.is_active)
        .bind(data.is_admin)
        .execute(&self.connection_pool)
        .await?;

        // Get the last inserted ID
        let new_id = result.last_insert_id() as i32;

        Ok(User {
            id: new_id,
            inn: data.inn.clone(),
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            is_active: data.is_active,
            is_admin: data.is_admin,
        })
    }

    async fn read(&self, id: &i32) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }

    async fn read_all(&self) -> Result<Vec<User>, Error> {
        sqlx::query_as::<_, User>(&format!("{SELECT_USER} ORDER BY id"))
            .fetch_all(&self.connection_pool)
            .await
    }

    async fn update(&self, id: &i32, data: &UserChanges) -> Result<User, Error> {
        // lettura e UPDATE nella stessa transazione, riga bloccata fino al commit
        let mut tx = self.connection_pool.begin().await?;

        let mut user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = ? FOR UPDATE"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(Error::RowNotFound)?;
        data.apply_to(&mut user);

        sqlx::query(
            "UPDATE users SET inn = ?, username = ?, password_hash = ?, is_active = ?, is_admin = ? WHERE id = ?",
        )
        .bind(&user.inn)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.is_admin)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(user)
    }

    async fn delete(&self, id: &i32) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE username = ?"))
            .bind(username)
            .fetch_optional(&self.connection_pool)
            .await
    }
}
