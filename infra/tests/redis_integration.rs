//! Integration tests for the Redis event publisher.
//!
//! Require a reachable Redis instance; set REDIS_URL and run with `--ignored`.

use uuid::Uuid;

use auth_core::domain::events::{AccountCreatedEvent, ProfileFields};
use auth_core::services::account::AccountEventPublisher;
use auth_infra::RedisEventPublisher;

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_publish_account_created_event() {
    let publisher = RedisEventPublisher::new(&redis_url(), "user_service_test")
        .await
        .expect("Failed to connect to Redis");

    let event = AccountCreatedEvent::new(Uuid::new_v4(), "alice", ProfileFields::default());
    publisher.publish(&event).await.unwrap();
    assert_eq!(publisher.channel(), "user_service_test");
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_unreachable_redis_fails_to_connect() {
    let result = RedisEventPublisher::new("redis://127.0.0.1:1", "user_service").await;
    assert!(result.is_err());
}
