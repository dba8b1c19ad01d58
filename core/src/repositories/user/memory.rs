//! In-memory implementation of UserRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Process-local account store keyed by username
#[derive(Clone)]
pub struct InMemoryUserRepository {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryUserRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.id == id).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        // Check and insert under one write guard
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.username) {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        accounts.insert(account.username.clone(), account.clone());
        Ok(account)
    }
}
