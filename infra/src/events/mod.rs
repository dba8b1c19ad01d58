//! Account event publication over Redis pub/sub

pub mod redis_publisher;

pub use redis_publisher::RedisEventPublisher;
