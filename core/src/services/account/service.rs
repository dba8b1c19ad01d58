//! Account service implementation

use std::fmt;
use std::sync::Arc;

use auth_shared::validation::{validate_password, validate_username};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::events::{AccountCreatedEvent, ProfileFields};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;

use super::traits::{AccountEventPublisher, PasswordHasher};

/// Hashed once and checked against when a login names an unknown user
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Input for a signup
#[derive(Clone)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub profile: ProfileFields,
}

impl SignupRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            profile: ProfileFields::default(),
        }
    }

    pub fn with_profile(mut self, profile: ProfileFields) -> Self {
        self.profile = profile;
        self
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}

/// Account service: signup, lookup and login
pub struct AccountService<U, H, P>
where
    U: UserRepository,
    H: PasswordHasher,
    P: AccountEventPublisher + 'static,
{
    user_repository: Arc<U>,
    hasher: Arc<H>,
    publisher: Arc<P>,
    dummy_hash: OnceCell<String>,
}

impl<U, H, P> AccountService<U, H, P>
where
    U: UserRepository,
    H: PasswordHasher,
    P: AccountEventPublisher + 'static,
{
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Account persistence
    /// * `hasher` - Password hashing
    /// * `publisher` - Sink for account-created events
    pub fn new(user_repository: Arc<U>, hasher: Arc<H>, publisher: Arc<P>) -> Self {
        Self {
            user_repository,
            hasher,
            publisher,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Register a new account
    ///
    /// The account is stored with an empty role set. An account-created event is
    /// dispatched on a background task; its outcome never affects the result.
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - Id of the new account
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Username taken
    /// * `Err(DomainError)` - Validation, hashing or store failure
    pub async fn signup(&self, request: SignupRequest) -> DomainResult<Uuid> {
        let SignupRequest {
            username,
            password,
            profile,
        } = request;

        validate_username(&username).map_err(|v| DomainError::from_violation("username", v))?;
        validate_password(&password).map_err(|v| DomainError::from_violation("password", v))?;

        // Fast path; the store's create is what actually guarantees uniqueness
        if self.user_repository.exists_by_username(&username).await? {
            tracing::info!(username = %username, "Signup rejected, username already exists");
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        let password_hash = self.hasher.hash(&password).await?;
        let account = self
            .user_repository
            .create(Account::new(username, password_hash))
            .await
            .map_err(|e| {
                if matches!(e, DomainError::Auth(AuthError::UserAlreadyExists)) {
                    tracing::info!("Signup lost a race for the same username");
                }
                e
            })?;

        tracing::info!(user_id = %account.id, username = %account.username, "Account created");

        self.dispatch_created_event(AccountCreatedEvent::new(
            account.id,
            &account.username,
            profile,
        ));

        Ok(account.id)
    }

    /// Find an account by username
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - No such account
    pub async fn find_by_username(&self, username: &str) -> DomainResult<Account> {
        self.user_repository
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    /// Resolve the account id for a username
    pub async fn resolve_user_id(&self, username: &str) -> DomainResult<Uuid> {
        Ok(self.find_by_username(username).await?.id)
    }

    /// Check credentials and return the account.
    ///
    /// Unknown usernames and wrong passwords both fail with `InvalidCredentials`,
    /// and both pay for one hash comparison.
    pub async fn login(&self, username: &str, raw_password: &str) -> DomainResult<Account> {
        let account = match self.user_repository.find_by_username(username).await? {
            Some(account) => account,
            None => {
                let dummy = self
                    .dummy_hash
                    .get_or_try_init(|| self.hasher.hash(DUMMY_PASSWORD))
                    .await?;
                self.hasher.matches(raw_password, dummy).await?;

                tracing::info!(username = %username, "Login failed, unknown username");
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        if !self.hasher.matches(raw_password, &account.password_hash).await? {
            tracing::info!(username = %username, "Login failed, wrong password");
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        tracing::debug!(user_id = %account.id, "Login succeeded");
        Ok(account)
    }

    fn dispatch_created_event(&self, event: AccountCreatedEvent) {
        let publisher = Arc::clone(&self.publisher);
        tokio::spawn(async move {
            if let Err(e) = publisher.publish(&event).await {
                tracing::warn!(
                    user_id = %event.user_id,
                    error = %e,
                    "Failed to publish account created event"
                );
            }
        });
    }
}
