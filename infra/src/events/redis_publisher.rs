//! Redis pub/sub implementation of AccountEventPublisher.
//!
//! Each event is serialized to JSON and published on a single channel.
//! Subscribers that are offline miss the event; delivery is best effort.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use auth_core::domain::events::AccountCreatedEvent;
use auth_core::errors::DomainError;
use auth_core::services::account::AccountEventPublisher;
use auth_shared::EventsConfig;

use crate::InfrastructureError;

const MAX_CONNECT_ATTEMPTS: u32 = 3;
const RETRY_DELAY_MS: u64 = 100;

/// Publishes account events to a Redis channel
#[derive(Clone)]
pub struct RedisEventPublisher {
    /// Multiplexed connection, cheap to clone per publish
    connection: MultiplexedConnection,
    channel: String,
}

impl RedisEventPublisher {
    /// Connect to Redis and publish on `channel`
    ///
    /// # Arguments
    /// * `url` - Redis connection URL
    /// * `channel` - Pub/sub channel events are published on
    pub async fn new(url: &str, channel: impl Into<String>) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(url), "Connecting event publisher to Redis");

        let client = Client::open(url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid Redis URL: {}", e)))?;
        let connection = Self::connect_with_retry(&client).await?;

        Ok(Self {
            connection,
            channel: channel.into(),
        })
    }

    pub async fn from_config(config: &EventsConfig) -> Result<Self, InfrastructureError> {
        Self::new(&config.redis_url, config.channel.clone()).await
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    async fn connect_with_retry(client: &Client) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = RETRY_DELAY_MS;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < MAX_CONNECT_ATTEMPTS => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, MAX_CONNECT_ATTEMPTS, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay *= 2;
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Redis(e));
                }
            }
        }
    }
}

#[async_trait]
impl AccountEventPublisher for RedisEventPublisher {
    async fn publish(&self, event: &AccountCreatedEvent) -> Result<(), DomainError> {
        let payload = serde_json::to_string(event).map_err(|e| DomainError::Internal {
            message: format!("Failed to serialize account event: {}", e),
        })?;

        let mut conn = self.connection.clone();
        let receivers: i64 = conn
            .publish(&self.channel, payload)
            .await
            .map_err(|e| DomainError::Store {
                message: format!("Failed to publish account event: {}", e),
            })?;

        debug!(
            channel = %self.channel,
            user_id = %event.user_id,
            receivers,
            "Published account created event"
        );
        Ok(())
    }
}

/// Hide credentials embedded in a Redis URL before logging it
fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
