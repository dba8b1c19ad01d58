//! Account event publishing configuration

use serde::{Deserialize, Serialize};

/// Sink for account lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventBackend {
    /// Emit events as structured log lines only
    Log,
    /// PUBLISH events as JSON on a Redis channel
    Redis,
}

/// Event publishing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EventsConfig {
    pub backend: EventBackend,

    /// Redis connection URL, used by the redis backend
    pub redis_url: String,

    /// Channel account-created events are published on
    pub channel: String,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            backend: EventBackend::Log,
            redis_url: String::from("redis://127.0.0.1:6379"),
            channel: String::from("user_service"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_defaults() {
        let config = EventsConfig::default();
        assert_eq!(config.backend, EventBackend::Log);
        assert_eq!(config.channel, "user_service");
    }

    #[test]
    fn test_events_backend_parsing() {
        let config: EventsConfig =
            serde_json::from_str(r#"{"backend": "redis", "channel": "accounts"}"#).unwrap();
        assert_eq!(config.backend, EventBackend::Redis);
        assert_eq!(config.channel, "accounts");
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
    }
}
