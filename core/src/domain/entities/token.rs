//! Token entities for JWT access tokens and persisted refresh tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID, makes two tokens issued in the same second distinct
    pub jti: String,

    /// Role names at issuance. Advisory only: authorization re-reads the account.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `username` - The subject
    /// * `roles` - Role names to embed
    /// * `ttl_seconds` - Lifetime of the token
    /// * `issuer` / `audience` - Values checked again on verification
    pub fn new_access_token(
        username: impl Into<String>,
        roles: Vec<String>,
        ttl_seconds: i64,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            sub: username.into(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.into(),
            aud: audience.into(),
            jti: Uuid::new_v4().to_string(),
            roles,
        }
    }
}

/// Refresh token record stored by the repository.
///
/// Only the SHA-256 hash of the opaque token is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// Owner of the token
    pub username: String,

    /// Hashed token value
    pub token_hash: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new refresh token record
    pub fn new(username: impl Into<String>, token_hash: String, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            token_hash,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    /// A token whose expiry is now or in the past is expired
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// A freshly created refresh token: the clear token handed to the caller once,
/// plus the stored record
#[derive(Debug, Clone)]
pub struct IssuedRefreshToken {
    pub token: String,
    pub record: RefreshToken,
}

/// Access and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, access_expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
        }
    }
}
