//! User repository trait defining the interface for account persistence.
//!
//! Accounts are keyed by username. Implementations must make `create`
//! an atomic insert-if-absent so that two concurrent signups for the same
//! username cannot both succeed.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an account by its username (case-sensitive)
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that username
    /// * `Err(DomainError)` - Store failure
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Persist a new account.
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - The username is taken
    /// * `Err(DomainError)` - Store failure
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Check if an account exists with the given username
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_username(username).await?.is_some())
    }
}
