//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError, ValidationError};

use auth_shared::validation::CredentialViolation;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Persistence backend failure (connection loss, constraint the domain did not expect, ...)
    #[error("Store unavailable: {message}")]
    Store { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Whether the error means the caller could not be authenticated.
    ///
    /// Covers every rejected token as well as unknown users and bad credentials.
    /// Failing to sign a token is a server fault, not a caller one.
    pub fn is_unauthenticated(&self) -> bool {
        match self {
            DomainError::Token(TokenError::TokenGenerationFailed) => false,
            DomainError::Token(_) => true,
            DomainError::Auth(AuthError::Unauthenticated)
            | DomainError::Auth(AuthError::InvalidCredentials) => true,
            _ => false,
        }
    }

    /// Build a field validation error from a broken credential rule
    pub fn from_violation(field: &str, violation: CredentialViolation) -> Self {
        let field = field.to_string();
        let err = match violation {
            CredentialViolation::Empty => ValidationError::RequiredField { field },
            CredentialViolation::TooShort | CredentialViolation::TooLong => {
                ValidationError::InvalidLength { field }
            }
            CredentialViolation::ContainsWhitespace => ValidationError::InvalidFormat { field },
        };
        DomainError::ValidationErr(err)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
