//! Unit tests for the authentication service

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::principal::Principal;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{InMemoryRefreshTokenRepository, InMemoryUserRepository};
use crate::services::account::tests::mocks::PlainTextHasher;
use crate::services::account::{AccountService, LoggingEventPublisher, SignupRequest};
use crate::services::auth::AuthService;
use crate::services::gate::AuthorizationGate;
use crate::services::refresh::{RefreshTokenConfig, RefreshTokenService};
use crate::services::token::{TokenCodec, TokenCodecConfig};

type TestAuthService = AuthService<
    InMemoryUserRepository,
    InMemoryRefreshTokenRepository,
    PlainTextHasher,
    LoggingEventPublisher,
>;

fn build() -> (TestAuthService, AuthorizationGate<InMemoryUserRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let tokens = Arc::new(InMemoryRefreshTokenRepository::new());
    let codec = Arc::new(TokenCodec::new(TokenCodecConfig {
        jwt_secret: "test-secret".to_string(),
        ..TokenCodecConfig::default()
    }));

    let accounts = Arc::new(AccountService::new(
        Arc::clone(&users),
        Arc::new(PlainTextHasher::new()),
        Arc::new(LoggingEventPublisher),
    ));
    let refresh = Arc::new(RefreshTokenService::new(
        tokens,
        Arc::clone(&users),
        Arc::clone(&codec),
        RefreshTokenConfig::default(),
    ));

    let gate = AuthorizationGate::new(Arc::clone(&codec), users);
    (AuthService::new(accounts, refresh, codec), gate)
}

#[tokio::test]
async fn test_signup_returns_usable_tokens() {
    let (service, gate) = build();

    let response = service
        .signup(SignupRequest::new("alice", "secret123"))
        .await
        .unwrap();

    assert!(!response.access_token.is_empty());
    assert!(!response.refresh_token.is_empty());
    assert_eq!(response.expires_in, 900);

    let principal = gate.authenticate(&response.access_token).await.unwrap();
    assert_eq!(principal.user_id, response.user_id);
    assert_eq!(service.whoami(&principal).await.unwrap(), response.user_id);
}

#[tokio::test]
async fn test_duplicate_signup_issues_nothing() {
    let (service, _) = build();
    service.signup(SignupRequest::new("alice", "secret123")).await.unwrap();

    let result = service.signup(SignupRequest::new("alice", "secret123")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
async fn test_login_rotates_out_signup_refresh_token() {
    let (service, _) = build();
    let signup = service.signup(SignupRequest::new("alice", "secret123")).await.unwrap();

    let login = service.login("alice", "secret123").await.unwrap();
    assert_eq!(login.user_id, signup.user_id);

    // One active refresh token per user
    let stale = service.refresh(&signup.refresh_token).await;
    assert!(matches!(
        stale,
        Err(DomainError::Token(TokenError::RefreshTokenNotFound))
    ));
    assert!(service.refresh(&login.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_login_with_bad_password() {
    let (service, _) = build();
    service.signup(SignupRequest::new("alice", "secret123")).await.unwrap();

    let result = service.login("alice", "nope-nope").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_refresh_flow() {
    let (service, gate) = build();
    let signup = service.signup(SignupRequest::new("alice", "secret123")).await.unwrap();

    let refreshed = service.refresh(&signup.refresh_token).await.unwrap();
    assert_eq!(refreshed.user_id, signup.user_id);
    assert_ne!(refreshed.refresh_token, signup.refresh_token);
    assert!(gate.authenticate(&refreshed.access_token).await.is_ok());

    let replay = service.refresh(&signup.refresh_token).await;
    assert!(matches!(
        replay,
        Err(DomainError::Token(TokenError::RefreshTokenNotFound))
    ));
}

#[tokio::test]
async fn test_revoke_all_through_refresh_tokens() {
    let (service, _) = build();
    let signup = service.signup(SignupRequest::new("alice", "secret123")).await.unwrap();

    assert_eq!(service.refresh_tokens().revoke_all("alice").await.unwrap(), 1);
    assert!(service.refresh(&signup.refresh_token).await.is_err());
}

#[tokio::test]
async fn test_whoami_for_unknown_principal() {
    let (service, _) = build();
    let principal = Principal {
        user_id: Uuid::new_v4(),
        username: "ghost".to_string(),
        authorities: Default::default(),
    };

    let result = service.whoami(&principal).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::Unauthenticated))
    ));
}
