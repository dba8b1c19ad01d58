//! Collaborator traits consumed by the account service

use async_trait::async_trait;

use crate::domain::events::AccountCreatedEvent;
use crate::errors::DomainError;

/// One-way password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password
    async fn hash(&self, raw: &str) -> Result<String, DomainError>;

    /// Check a raw password against a stored hash
    async fn matches(&self, raw: &str, hash: &str) -> Result<bool, DomainError>;
}

/// Downstream notification of account lifecycle events.
///
/// Delivery is best effort; callers never wait on it.
#[async_trait]
pub trait AccountEventPublisher: Send + Sync {
    async fn publish(&self, event: &AccountCreatedEvent) -> Result<(), DomainError>;
}
