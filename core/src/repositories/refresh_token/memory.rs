//! In-memory implementation of RefreshTokenRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::trait_::RefreshTokenRepository;

/// Process-local refresh token store keyed by token hash
#[derive(Clone)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl InMemoryRefreshTokenRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

}

impl Default for InMemoryRefreshTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }

    async fn take(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens.remove(token_hash))
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens.remove(token_hash).is_some())
    }

    async fn replace_for_user(&self, token: RefreshToken) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;

        let before = tokens.len();
        tokens.retain(|_, t| t.username != token.username);
        let removed = (before - tokens.len()) as u64;

        tokens.insert(token.token_hash.clone(), token);
        Ok(removed)
    }

    async fn delete_by_username(&self, username: &str) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;

        let before = tokens.len();
        tokens.retain(|_, t| t.username != username);
        Ok((before - tokens.len()) as u64)
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let now = Utc::now();

        let before = tokens.len();
        tokens.retain(|_, t| t.expires_at > now);
        Ok((before - tokens.len()) as u64)
    }
}
