//! Access token to principal resolution

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::principal::Principal;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::token::TokenCodec;

/// Object-safe authentication entry point used by the HTTP layer
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve an access token to a principal.
    ///
    /// Every credential problem yields `AuthError::Unauthenticated`; only
    /// store failures come back as other errors.
    async fn authenticate(&self, access_token: &str) -> DomainResult<Principal>;
}

/// Verifies access tokens and re-reads the account behind them
pub struct AuthorizationGate<U: UserRepository> {
    codec: Arc<TokenCodec>,
    user_repository: Arc<U>,
}

impl<U: UserRepository> AuthorizationGate<U> {
    pub fn new(codec: Arc<TokenCodec>, user_repository: Arc<U>) -> Self {
        Self {
            codec,
            user_repository,
        }
    }

    /// Resolve an access token to a principal
    ///
    /// Authorities come from the stored account, not from the token claims,
    /// so role changes apply to tokens already issued.
    pub async fn authenticate(&self, access_token: &str) -> DomainResult<Principal> {
        let claims = match self.codec.verify(access_token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(reason = %e, "Access token rejected");
                return Err(DomainError::Auth(AuthError::Unauthenticated));
            }
        };

        let account = match self.user_repository.find_by_username(&claims.sub).await? {
            Some(account) => account,
            None => {
                tracing::debug!(username = %claims.sub, "Access token for unknown user");
                return Err(DomainError::Auth(AuthError::Unauthenticated));
            }
        };

        Ok(Principal::from_account(&account))
    }
}

#[async_trait]
impl<U: UserRepository> Authenticator for AuthorizationGate<U> {
    async fn authenticate(&self, access_token: &str) -> DomainResult<Principal> {
        AuthorizationGate::authenticate(self, access_token).await
    }
}
