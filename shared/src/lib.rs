//! Shared utilities and common types for the auth service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered configuration loader
//! - Error response structures
//! - Credential input validation rules

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, EventBackend, EventsConfig, JwtConfig,
    LogFormat, LoggingConfig, PasswordConfig, ServerConfig, StorageBackend, StorageConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
