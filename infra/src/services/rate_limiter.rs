//! Redis-based sliding-window rate limiter.
//!
//! The whole check - prune the window, count, record the admission - runs as
//! one Lua script, so concurrent senders across processes share one accurate
//! window per key.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use redis::Script;
use tracing::debug;

use vr_core::delivery::{LimitError, RateLimiter};
use vr_shared::config::delivery::RateLimitConfig;

use crate::cache::RedisClient;

static SLIDE_WINDOW: Lazy<Script> =
    Lazy::new(|| Script::new(include_str!("scripts/slide_window.lua")));

/// Sliding-window implementation of [`RateLimiter`]
#[derive(Clone)]
pub struct RedisSlidingWindowLimiter {
    client: RedisClient,
    window: Duration,
    threshold: u64,
}

impl RedisSlidingWindowLimiter {
    pub fn new(client: RedisClient, window: Duration, threshold: u64) -> Self {
        Self {
            client,
            window,
            threshold,
        }
    }

    pub fn from_config(client: RedisClient, config: &RateLimitConfig) -> Self {
        Self::new(
            client,
            Duration::from_secs(config.window_secs),
            config.max_sends,
        )
    }
}

#[async_trait]
impl RateLimiter for RedisSlidingWindowLimiter {
    async fn limit(&self, key: &str) -> Result<bool, LimitError> {
        let mut conn = self.client.connection();
        let now = Utc::now().timestamp_millis();
        let window_start = now - self.window.as_millis() as i64;

        let over_budget: i64 = SLIDE_WINDOW
            .key(format!("rate_limit:{key}"))
            .arg(window_start)
            .arg(now)
            .arg(self.threshold)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| LimitError(e.to_string()))?;

        debug!(key = key, limited = over_budget == 1, "rate limit checked");
        Ok(over_budget == 1)
    }
}
