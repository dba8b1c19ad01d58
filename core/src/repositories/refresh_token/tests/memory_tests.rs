//! Unit tests for the in-memory refresh token repository

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::token::RefreshToken;
use crate::repositories::refresh_token::{InMemoryRefreshTokenRepository, RefreshTokenRepository};

fn record(username: &str, hash: &str) -> RefreshToken {
    RefreshToken::new(username, hash.to_string(), 3600)
}

#[tokio::test]
async fn test_store_and_find() {
    let repo = InMemoryRefreshTokenRepository::new();
    repo.replace_for_user(record("alice", "h1")).await.unwrap();

    let found = repo.find_by_hash("h1").await.unwrap().unwrap();
    assert_eq!(found.username, "alice");
    assert!(repo.find_by_hash("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_take_consumes_record() {
    let repo = InMemoryRefreshTokenRepository::new();
    repo.replace_for_user(record("alice", "h1")).await.unwrap();

    assert!(repo.take("h1").await.unwrap().is_some());
    assert!(repo.take("h1").await.unwrap().is_none());
    assert!(repo.find_by_hash("h1").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_take_has_single_winner() {
    let repo = Arc::new(InMemoryRefreshTokenRepository::new());
    repo.replace_for_user(record("alice", "h1")).await.unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.take("h1").await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().is_some() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_replace_for_user_keeps_one_record() {
    let repo = InMemoryRefreshTokenRepository::new();
    assert_eq!(repo.replace_for_user(record("alice", "h1")).await.unwrap(), 0);
    repo.replace_for_user(record("bob", "h3")).await.unwrap();

    let removed = repo.replace_for_user(record("alice", "h4")).await.unwrap();
    assert_eq!(removed, 1);

    assert!(repo.find_by_hash("h1").await.unwrap().is_none());
    assert!(repo.find_by_hash("h4").await.unwrap().is_some());
    assert!(repo.find_by_hash("h3").await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_replace_leaves_single_record() {
    let repo = Arc::new(InMemoryRefreshTokenRepository::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.replace_for_user(record("alice", &format!("h{}", i)))
                    .await
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let mut remaining = 0;
    for i in 0..8 {
        if repo.find_by_hash(&format!("h{}", i)).await.unwrap().is_some() {
            remaining += 1;
        }
    }
    assert_eq!(remaining, 1);
}

#[tokio::test]
async fn test_delete_by_username() {
    let repo = InMemoryRefreshTokenRepository::new();
    repo.replace_for_user(record("alice", "h1")).await.unwrap();
    repo.replace_for_user(record("bob", "h3")).await.unwrap();

    assert_eq!(repo.delete_by_username("alice").await.unwrap(), 1);
    assert_eq!(repo.delete_by_username("alice").await.unwrap(), 0);
    assert!(repo.find_by_hash("h3").await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_expired() {
    let repo = InMemoryRefreshTokenRepository::new();
    let mut stale = record("alice", "h1");
    stale.expires_at = Utc::now() - Duration::seconds(1);
    repo.replace_for_user(stale).await.unwrap();
    repo.replace_for_user(record("bob", "h2")).await.unwrap();

    assert_eq!(repo.delete_expired().await.unwrap(), 1);
    assert!(repo.find_by_hash("h1").await.unwrap().is_none());
    assert!(repo.find_by_hash("h2").await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete() {
    let repo = InMemoryRefreshTokenRepository::new();
    repo.replace_for_user(record("alice", "h1")).await.unwrap();

    assert!(repo.delete("h1").await.unwrap());
    assert!(!repo.delete("h1").await.unwrap());
}
