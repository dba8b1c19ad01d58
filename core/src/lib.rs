//! # Auth Core
//!
//! Domain layer of the auth service: accounts, access tokens, refresh tokens
//! and the authorization gate. Persistence, password hashing and event
//! publication are reached through traits implemented elsewhere.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    Account, AccountCreatedEvent, AuthResponse, Claims, IssuedRefreshToken, Principal,
    ProfileFields, RefreshToken, TokenPair,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{
    InMemoryRefreshTokenRepository, InMemoryUserRepository, RefreshTokenRepository,
    UserRepository,
};
pub use services::{
    AccountEventPublisher, AccountService, AuthService, Authenticator, AuthorizationGate,
    LoggingEventPublisher, PasswordHasher, RefreshTokenConfig, RefreshTokenService,
    SignupRequest, TokenCodec, TokenCodecConfig,
};
