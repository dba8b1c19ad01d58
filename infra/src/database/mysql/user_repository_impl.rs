//! MySQL implementation of the UserRepository trait.
//!
//! Username uniqueness is enforced by the `uk_users_username` index, so a
//! concurrent duplicate insert fails in the database rather than slipping
//! past a read-then-write check.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use auth_core::domain::entities::account::Account;
use auth_core::errors::{AuthError, DomainError};
use auth_core::repositories::UserRepository;

use super::errors::{decode_error, is_unique_violation, store_error};

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity, roles still empty
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(|e| decode_error("id", e))?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| decode_error("id", e))?,
            username: row
                .try_get("username")
                .map_err(|e| decode_error("username", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| decode_error("password_hash", e))?,
            roles: BTreeSet::new(),
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| decode_error("created_at", e))?,
        })
    }

    async fn load_roles(&self, id: Uuid) -> Result<BTreeSet<String>, DomainError> {
        let roles: Vec<String> = sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = ?")
            .bind(id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to load user roles", e))?;

        Ok(roles.into_iter().collect())
    }

    async fn fetch_one_where(
        &self,
        column: &str,
        value: String,
    ) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT id, username, password_hash, created_at FROM users WHERE {} = ?",
            column
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find user", e))?;

        match row {
            Some(row) => {
                let mut account = Self::row_to_account(&row)?;
                account.roles = self.load_roles(account.id).await?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        self.fetch_one_where("username", username.to_string()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.fetch_one_where("id", id.to_string()).await
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin transaction", e))?;

        let inserted = sqlx::query(
            "INSERT INTO users (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(account.id.to_string())
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            if is_unique_violation(&e) {
                return Err(DomainError::Auth(AuthError::UserAlreadyExists));
            }
            return Err(store_error("Failed to insert user", e));
        }

        for role in &account.roles {
            sqlx::query("INSERT INTO user_roles (user_id, role) VALUES (?, ?)")
                .bind(account.id.to_string())
                .bind(role)
                .execute(&mut *tx)
                .await
                .map_err(|e| store_error("Failed to insert user role", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit user insert", e))?;

        Ok(account)
    }
}
