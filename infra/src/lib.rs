//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the auth core depends on:
//!
//! - **Database**: MySQL repositories using SQLx, plus migrations
//! - **Hashing**: bcrypt password hasher
//! - **Events**: Redis pub/sub publisher for account events

pub mod database;
pub mod events;
pub mod hashing;

pub use database::{DatabasePool, MySqlRefreshTokenRepository, MySqlUserRepository};
pub use events::RedisEventPublisher;
pub use hashing::BcryptPasswordHasher;

/// Infrastructure-specific error types raised while wiring up backends
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis error
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
