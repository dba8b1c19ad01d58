//! Token codec module for JWT access tokens
//!
//! Signs and verifies short-lived HS256 access tokens. Verification is
//! stateless; nothing about an access token is persisted.

mod codec;
mod config;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenCodecConfig;
