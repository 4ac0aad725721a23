//! Integration tests for the Redis code store and rate limiter
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p vr_infra --test redis_code_store_integration -- --ignored

use std::time::Duration;

use rand::Rng;

use vr_core::delivery::RateLimiter;
use vr_core::errors::DomainError;
use vr_core::repositories::CodeStore;
use vr_infra::cache::{RedisClient, RedisCodeStore};
use vr_infra::services::RedisSlidingWindowLimiter;
use vr_shared::CacheConfig;

async fn client() -> RedisClient {
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    RedisClient::connect(&config)
        .await
        .expect("failed to connect to Redis")
}

/// Unique recipient per test run so reruns never collide on quota state.
fn random_recipient() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("178{suffix:09}")
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn set_then_verify_round_trips() {
    let store = RedisCodeStore::new(client().await, Duration::from_secs(600));
    let recipient = random_recipient();

    store.set("login", &recipient, "123456").await.unwrap();
    assert!(store.verify("login", &recipient, "123456").await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn immediate_resend_is_rejected() {
    let store = RedisCodeStore::new(client().await, Duration::from_secs(600));
    let recipient = random_recipient();

    store.set("login", &recipient, "123456").await.unwrap();
    let err = store.set("login", &recipient, "654321").await.unwrap_err();
    assert!(matches!(err, DomainError::SendTooFrequent));

    // The rejected set must not have replaced the stored code.
    assert!(store.verify("login", &recipient, "123456").await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn wrong_guesses_exhaust_the_attempt_budget() {
    let store = RedisCodeStore::new(client().await, Duration::from_secs(600));
    let recipient = random_recipient();

    store.set("login", &recipient, "123456").await.unwrap();

    for _ in 0..3 {
        assert!(!store.verify("login", &recipient, "000000").await.unwrap());
    }

    let err = store
        .verify("login", &recipient, "123456")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TooManyAttempts));
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn verify_without_a_code_reports_exhaustion() {
    let store = RedisCodeStore::new(client().await, Duration::from_secs(600));
    let recipient = random_recipient();

    // No counter key exists, indistinguishable from an expired entry.
    let err = store
        .verify("login", &recipient, "123456")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TooManyAttempts));
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn sliding_window_limits_after_threshold() {
    let limiter =
        RedisSlidingWindowLimiter::new(client().await, Duration::from_secs(10), 3);
    let key = format!("it:{}", random_recipient());

    for _ in 0..3 {
        assert!(!limiter.limit(&key).await.unwrap());
    }
    assert!(limiter.limit(&key).await.unwrap());
}
