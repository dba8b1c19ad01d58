//! Authentication response value object returned by signup, login and refresh.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;

/// Tokens plus the id of the account they were issued for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Opaque refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Account id
    pub user_id: Uuid,

    /// Access token expiration time in seconds
    pub expires_in: i64,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair
    pub fn from_token_pair(token_pair: TokenPair, user_id: Uuid) -> Self {
        Self {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            user_id,
            expires_in: token_pair.access_expires_in,
        }
    }
}
