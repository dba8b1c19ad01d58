//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing, token lifetimes and password hashing
//! - `database` - MySQL pool settings and storage backend selection
//! - `environment` - environment detection and logging configuration
//! - `events` - account event publishing
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod events;
pub mod server;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, PasswordConfig};
pub use database::{DatabaseConfig, StorageBackend, StorageConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use events::{EventBackend, EventsConfig};
pub use server::ServerConfig;

/// Prefix for environment variable overrides, e.g. `AUTH_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "AUTH";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Account event publishing
    pub events: EventsConfig,

    /// Storage backend selection
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Defaults for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            ..Default::default()
        }
    }

    /// Load configuration: `.env` files, built-in defaults, `config/default`,
    /// `config/{environment}` and finally `AUTH_*` environment variables.
    ///
    /// Does not validate; call [`AppConfig::validate`] once logging is up.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case outside local development
        let _ = dotenvy::dotenv();

        let environment = Environment::from_env();
        let defaults = Config::try_from(&Self::for_environment(environment))?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Reject configurations the services cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt = &self.auth.jwt;

        if jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt.secret must not be empty".into(),
            ));
        }
        if jwt.access_token_expiry <= 0 || jwt.refresh_token_expiry <= 0 {
            return Err(ConfigError::Message(
                "token expiry values must be positive".into(),
            ));
        }
        if jwt.refresh_token_expiry <= jwt.access_token_expiry {
            return Err(ConfigError::Message(
                "auth.jwt.refresh_token_expiry must be longer than access_token_expiry".into(),
            ));
        }
        if !(4..=31).contains(&self.auth.password.bcrypt_cost) {
            return Err(ConfigError::Message(
                "auth.password.bcrypt_cost must be between 4 and 31".into(),
            ));
        }

        if jwt.is_using_default_secret() && !self.environment.is_development() {
            tracing::warn!(
                environment = %self.environment,
                "Using the default JWT secret outside development"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.events.backend, EventBackend::Log);
    }

    #[test]
    fn test_for_environment_sets_logging() {
        let config = AppConfig::for_environment(Environment::Production);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let mut config = AppConfig::default();
        config.auth.jwt.secret = String::from("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_ttls() {
        let mut config = AppConfig::default();
        config.auth.jwt.access_token_expiry = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.auth.jwt.refresh_token_expiry = config.auth.jwt.access_token_expiry;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bcrypt_cost_out_of_range() {
        let mut config = AppConfig::default();
        config.auth.password.bcrypt_cost = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_leaves_validation_to_caller() {
        std::env::set_var("AUTH_AUTH__PASSWORD__BCRYPT_COST", "3");
        let loaded = AppConfig::load();
        std::env::remove_var("AUTH_AUTH__PASSWORD__BCRYPT_COST");

        let config = loaded.unwrap();
        assert_eq!(config.auth.password.bcrypt_cost, 3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_round_trip_through_config_builder() {
        let defaults = Config::try_from(&AppConfig::default()).unwrap();
        let config: AppConfig = Config::builder()
            .add_source(defaults)
            .set_override("server.port", 9100)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.auth.jwt.access_token_expiry, 900);
    }
}
