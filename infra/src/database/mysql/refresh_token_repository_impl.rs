//! MySQL implementation of the RefreshTokenRepository trait.
//!
//! `take` locks the row with `SELECT ... FOR UPDATE` before deleting it, so a
//! second transaction for the same hash blocks and then finds nothing.
//! `replace_for_user` locks the owner's `users` row first: two DELETEs on a
//! username with no tokens would otherwise share a gap lock and deadlock on
//! their INSERTs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use auth_core::domain::entities::token::RefreshToken;
use auth_core::errors::DomainError;
use auth_core::repositories::RefreshTokenRepository;

use super::errors::{decode_error, is_unique_violation, store_error};

const SELECT_COLUMNS: &str = "SELECT id, username, token_hash, created_at, expires_at FROM refresh_tokens";

/// MySQL implementation of RefreshTokenRepository
pub struct MySqlRefreshTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    /// Create a new MySQL refresh token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| decode_error("id", e))?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id).map_err(|e| decode_error("id", e))?,
            username: row
                .try_get("username")
                .map_err(|e| decode_error("username", e))?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| decode_error("token_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| decode_error("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| decode_error("expires_at", e))?,
        })
    }

    async fn insert<'e, E>(executor: E, token: &RefreshToken) -> Result<(), DomainError>
    where
        E: sqlx::Executor<'e, Database = sqlx::MySql>,
    {
        sqlx::query(
            "INSERT INTO refresh_tokens (id, username, token_hash, created_at, expires_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(token.id.to_string())
        .bind(&token.username)
        .bind(&token.token_hash)
        .bind(token.created_at)
        .bind(token.expires_at)
        .execute(executor)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Validation {
                    message: "Token already exists".to_string(),
                }
            } else {
                store_error("Failed to save refresh token", e)
            }
        })?;

        Ok(())
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE token_hash = ?", SELECT_COLUMNS))
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find refresh token", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn take(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin transaction", e))?;

        let row = sqlx::query(&format!("{} WHERE token_hash = ? FOR UPDATE", SELECT_COLUMNS))
            .bind(token_hash)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to lock refresh token", e))?;

        let token = match row {
            Some(row) => Self::row_to_token(&row)?,
            None => return Ok(None),
        };

        sqlx::query("DELETE FROM refresh_tokens WHERE id = ?")
            .bind(token.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to consume refresh token", e))?;

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit refresh token consumption", e))?;

        Ok(Some(token))
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace_for_user(&self, token: RefreshToken) -> Result<u64, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin transaction", e))?;

        sqlx::query("SELECT id FROM users WHERE username = ? FOR UPDATE")
            .bind(&token.username)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to lock user", e))?;

        let removed = sqlx::query("DELETE FROM refresh_tokens WHERE username = ?")
            .bind(&token.username)
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to delete previous refresh tokens", e))?
            .rows_affected();

        Self::insert(&mut *tx, &token).await?;

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit refresh token replacement", e))?;

        Ok(removed)
    }

    async fn delete_by_username(&self, username: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE username = ?")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to revoke refresh tokens", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete expired refresh tokens", e))?;

        Ok(result.rows_affected())
    }
}
