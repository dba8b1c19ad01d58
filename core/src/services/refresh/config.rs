//! Configuration for the refresh token service

use auth_shared::JwtConfig;

/// Configuration for the refresh token service
#[derive(Debug, Clone)]
pub struct RefreshTokenConfig {
    /// Refresh token lifetime in seconds
    pub ttl_seconds: i64,
    /// Length of the generated opaque token
    pub token_length: usize,
}

impl Default for RefreshTokenConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for RefreshTokenConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            ttl_seconds: jwt.refresh_token_expiry,
            token_length: 64,
        }
    }
}
