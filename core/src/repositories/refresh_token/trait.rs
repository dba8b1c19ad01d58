//! Refresh token repository trait.
//!
//! Records are keyed by the SHA-256 hash of the opaque token. `take` and
//! `replace_for_user` carry the atomicity the rotation flow depends on.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Look up a record by token hash without consuming it
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Remove and return the record in one step.
    ///
    /// Of any number of concurrent callers for the same hash, exactly one
    /// receives `Some`.
    async fn take(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Delete a record, returning whether it existed
    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Delete every record of `token.username` and store `token`, atomically.
    ///
    /// Concurrent calls for the same user serialize; afterwards exactly one
    /// of the stored tokens remains. Returns the number of records replaced.
    async fn replace_for_user(&self, token: RefreshToken) -> Result<u64, DomainError>;

    /// Delete every record owned by `username`
    async fn delete_by_username(&self, username: &str) -> Result<u64, DomainError>;

    /// Delete all records whose expiry has passed
    async fn delete_expired(&self) -> Result<u64, DomainError>;
}
