//! SMS delivery configuration: failover, rate limiting, queue, and worker

use serde::{Deserialize, Serialize};

/// Complete delivery-side configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Provider failover configuration
    pub failover: FailoverConfig,

    /// Outbound rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Durable delivery queue configuration
    pub queue: QueueConfig,

    /// Background worker configuration
    pub worker: WorkerConfig,
}

impl DeliveryConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            failover: FailoverConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            queue: QueueConfig::from_env(),
            worker: WorkerConfig::from_env(),
        }
    }
}

/// Provider failover configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FailoverConfig {
    /// Consecutive timeouts on the active provider before rotating to the next
    pub timeout_threshold: u32,
}

impl Default for FailoverConfig {
    fn default() -> Self {
        Self {
            timeout_threshold: 3,
        }
    }
}

impl FailoverConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            timeout_threshold: super::env_parse("SMS_FAILOVER_TIMEOUT_THRESHOLD", 3),
        }
    }
}

/// Sliding-window rate limit applied in front of the providers
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Window length in seconds
    pub window_secs: u64,

    /// Maximum sends admitted inside one window
    pub max_sends: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 1,
            max_sends: 100,
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            window_secs: super::env_parse("SMS_RATE_LIMIT_WINDOW_SECS", 1),
            max_sends: super::env_parse("SMS_RATE_LIMIT_MAX_SENDS", 100),
        }
    }
}

/// Durable delivery queue configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueueConfig {
    /// Minimum seconds a waiting item must stay untouched before it can be
    /// claimed; doubles as the retry backoff between attempts
    pub staleness_secs: u64,

    /// Maximum delivery attempts before an item is marked failed
    pub max_retries: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            staleness_secs: 60,
            max_retries: 3,
        }
    }
}

impl QueueConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            staleness_secs: super::env_parse("DELIVERY_QUEUE_STALENESS_SECS", 60),
            max_retries: super::env_parse("DELIVERY_QUEUE_MAX_RETRIES", 3),
        }
    }
}

/// Background delivery worker configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkerConfig {
    /// Deadline for one claim attempt, in milliseconds
    pub claim_timeout_ms: u64,

    /// Deadline for one provider send, in milliseconds
    pub send_timeout_ms: u64,

    /// Sleep between cycles when the queue is empty or storage misbehaves,
    /// in milliseconds
    pub idle_sleep_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            claim_timeout_ms: 1_000,
            send_timeout_ms: 1_000,
            idle_sleep_ms: 1_000,
        }
    }
}

impl WorkerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            claim_timeout_ms: super::env_parse("DELIVERY_WORKER_CLAIM_TIMEOUT_MS", 1_000),
            send_timeout_ms: super::env_parse("DELIVERY_WORKER_SEND_TIMEOUT_MS", 1_000),
            idle_sleep_ms: super::env_parse("DELIVERY_WORKER_IDLE_SLEEP_MS", 1_000),
        }
    }
}
