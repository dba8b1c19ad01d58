//! Refresh token service module
//!
//! Issues, verifies, rotates and revokes opaque refresh tokens. At most one
//! refresh token per user is active at a time.

mod config;
mod service;


pub use config::RefreshTokenConfig;
pub use service::{hash_token, RefreshTokenService, RotatedTokens};
