//! Refresh token service implementation

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::account::Account;
use crate::domain::entities::token::{IssuedRefreshToken, RefreshToken};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{RefreshTokenRepository, UserRepository};
use crate::services::token::TokenCodec;

use super::config::RefreshTokenConfig;

/// Hashes an opaque token for storage and lookup
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Result of a successful rotation
#[derive(Debug, Clone)]
pub struct RotatedTokens {
    pub account: Account,
    pub access_token: String,
    pub refresh_token: IssuedRefreshToken,
}

/// Service for refresh token issuance and rotation
pub struct RefreshTokenService<R, U>
where
    R: RefreshTokenRepository,
    U: UserRepository,
{
    repository: Arc<R>,
    user_repository: Arc<U>,
    codec: Arc<TokenCodec>,
    config: RefreshTokenConfig,
}

impl<R, U> RefreshTokenService<R, U>
where
    R: RefreshTokenRepository,
    U: UserRepository,
{
    /// Creates a new refresh token service
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh token persistence
    /// * `user_repository` - Account lookup for rotation
    /// * `codec` - Access token issuance for rotation
    /// * `config` - Token lifetime settings
    pub fn new(
        repository: Arc<R>,
        user_repository: Arc<U>,
        codec: Arc<TokenCodec>,
        config: RefreshTokenConfig,
    ) -> Self {
        Self {
            repository,
            user_repository,
            codec,
            config,
        }
    }

    /// Issue a refresh token for `username`, invalidating any existing one
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedRefreshToken)` - The clear token (only copy) and stored record
    /// * `Err(DomainError)` - Store failure
    pub async fn create(&self, username: &str) -> DomainResult<IssuedRefreshToken> {
        let token = self.generate_token();
        let record = RefreshToken::new(username, hash_token(&token), self.config.ttl_seconds);

        let replaced = self.repository.replace_for_user(record.clone()).await?;
        if replaced > 0 {
            tracing::debug!(username = %username, replaced, "Replaced previous refresh tokens");
        }

        Ok(IssuedRefreshToken { token, record })
    }

    /// Look up a refresh token without consuming it
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::RefreshTokenNotFound)` - Unknown or already consumed
    /// * `Err(TokenError::RefreshTokenExpired)` - Expired; the record is purged
    pub async fn verify(&self, token: &str) -> DomainResult<RefreshToken> {
        let token_hash = hash_token(token);

        let record = self
            .repository
            .find_by_hash(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::RefreshTokenNotFound))?;

        if record.is_expired() {
            self.repository.delete(&token_hash).await?;
            tracing::debug!(username = %record.username, "Purged expired refresh token");
            return Err(DomainError::Token(TokenError::RefreshTokenExpired));
        }

        Ok(record)
    }

    /// Consume `token` and issue a new refresh token plus access token.
    ///
    /// The old record is removed with an atomic take, so of several concurrent
    /// callers presenting the same token only one succeeds; the others get
    /// `RefreshTokenNotFound`.
    pub async fn rotate(&self, token: &str) -> DomainResult<RotatedTokens> {
        let token_hash = hash_token(token);

        let old = self
            .repository
            .take(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::RefreshTokenNotFound))?;

        // Already removed by take, so an expired token is purged as well
        if old.is_expired() {
            tracing::debug!(username = %old.username, "Rotation attempted with expired refresh token");
            return Err(DomainError::Token(TokenError::RefreshTokenExpired));
        }

        let account = self
            .user_repository
            .find_by_username(&old.username)
            .await?
            .ok_or(DomainError::Auth(AuthError::Unauthenticated))?;

        let roles: Vec<String> = account.roles.iter().cloned().collect();
        let access_token = self.codec.issue(&account.username, &roles)?;
        let refresh_token = self.create(&account.username).await?;

        tracing::info!(user_id = %account.id, "Refresh token rotated");

        Ok(RotatedTokens {
            account,
            access_token,
            refresh_token,
        })
    }

    /// Revoke a single refresh token. Returns whether it existed.
    pub async fn revoke(&self, token: &str) -> DomainResult<bool> {
        self.repository.delete(&hash_token(token)).await
    }

    /// Revoke every refresh token of `username`
    pub async fn revoke_all(&self, username: &str) -> DomainResult<u64> {
        let count = self.repository.delete_by_username(username).await?;
        tracing::info!(username = %username, count, "Revoked refresh tokens");
        Ok(count)
    }

    /// Remove expired records
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        self.repository.delete_expired().await
    }

    fn generate_token(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.config.token_length)
            .map(char::from)
            .collect()
    }
}
