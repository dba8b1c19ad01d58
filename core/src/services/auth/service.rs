//! Main authentication service implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::principal::Principal;
use crate::domain::entities::token::TokenPair;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{RefreshTokenRepository, UserRepository};
use crate::services::account::{AccountEventPublisher, AccountService, PasswordHasher, SignupRequest};
use crate::services::refresh::RefreshTokenService;
use crate::services::token::TokenCodec;

/// Authentication service for the complete credential lifecycle
pub struct AuthService<U, R, H, P>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
    P: AccountEventPublisher + 'static,
{
    account_service: Arc<AccountService<U, H, P>>,
    refresh_service: Arc<RefreshTokenService<R, U>>,
    codec: Arc<TokenCodec>,
}

impl<U, R, H, P> AuthService<U, R, H, P>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
    P: AccountEventPublisher + 'static,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `account_service` - Signup, lookup and credential checks
    /// * `refresh_service` - Refresh token issuance and rotation
    /// * `codec` - Access token issuance
    pub fn new(
        account_service: Arc<AccountService<U, H, P>>,
        refresh_service: Arc<RefreshTokenService<R, U>>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            account_service,
            refresh_service,
            codec,
        }
    }

    /// Refresh token service, for administrative revocation
    pub fn refresh_tokens(&self) -> &RefreshTokenService<R, U> {
        &self.refresh_service
    }

    /// Register an account and issue its first token pair
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Tokens and the new account id
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Username taken; no tokens issued
    pub async fn signup(&self, request: SignupRequest) -> DomainResult<AuthResponse> {
        let username = request.username.clone();
        let user_id = self.account_service.signup(request).await?;

        // New accounts carry no roles
        let pair = self.issue_pair(&username, &[]).await?;
        Ok(AuthResponse::from_token_pair(pair, user_id))
    }

    /// Check credentials and issue a token pair
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthResponse> {
        let account = self.account_service.login(username, password).await?;

        let pair = self.issue_pair(&account.username, &roles_of(&account)).await?;
        tracing::info!(user_id = %account.id, "User logged in");
        Ok(AuthResponse::from_token_pair(pair, account.id))
    }

    /// Exchange a refresh token for a new pair
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        let rotated = self.refresh_service.rotate(refresh_token).await?;

        let pair = TokenPair::new(
            rotated.access_token,
            rotated.refresh_token.token,
            self.codec.access_ttl_seconds(),
        );
        Ok(AuthResponse::from_token_pair(pair, rotated.account.id))
    }

    /// Account id of an authenticated principal
    pub async fn whoami(&self, principal: &Principal) -> DomainResult<Uuid> {
        self.account_service
            .resolve_user_id(&principal.username)
            .await
            .map_err(|e| match e {
                DomainError::Auth(AuthError::UserNotFound) => {
                    DomainError::Auth(AuthError::Unauthenticated)
                }
                other => other,
            })
    }

    async fn issue_pair(&self, username: &str, roles: &[String]) -> DomainResult<TokenPair> {
        let refresh = self.refresh_service.create(username).await?;
        let access = self.codec.issue(username, roles)?;

        Ok(TokenPair::new(
            access,
            refresh.token,
            self.codec.access_ttl_seconds(),
        ))
    }
}

fn roles_of(account: &Account) -> Vec<String> {
    account.roles.iter().cloned().collect()
}
