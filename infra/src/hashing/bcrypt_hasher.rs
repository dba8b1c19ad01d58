//! bcrypt implementation of the PasswordHasher trait.
//!
//! bcrypt is CPU bound, so both operations run on the blocking pool to keep
//! the async workers free.

use async_trait::async_trait;

use auth_core::errors::DomainError;
use auth_core::services::account::PasswordHasher;
use auth_shared::PasswordConfig;

/// bcrypt password hasher with a configurable work factor
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with an explicit bcrypt cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_config(config: &PasswordConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

fn join_error(err: tokio::task::JoinError) -> DomainError {
    tracing::error!(error = %err, "Password hashing task failed");
    DomainError::Internal {
        message: "Password hashing task failed".to_string(),
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, raw: &str) -> Result<String, DomainError> {
        let raw = raw.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(raw, cost))
            .await
            .map_err(join_error)?
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to hash password");
                DomainError::Internal {
                    message: "Failed to hash password".to_string(),
                }
            })
    }

    async fn matches(&self, raw: &str, hash: &str) -> Result<bool, DomainError> {
        let raw = raw.to_string();
        let hash = hash.to_string();

        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(raw, &hash))
            .await
            .map_err(join_error)?;

        // A malformed stored hash is a mismatch, not a server fault
        match verified {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                Ok(false)
            }
        }
    }
}
