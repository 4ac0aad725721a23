//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection configuration
//! - `database` - Database connection and pool configuration
//! - `delivery` - SMS delivery, failover, queue, and worker configuration
//! - `verification` - Verification code lifecycle configuration

pub mod cache;
pub mod database;
pub mod delivery;
pub mod verification;

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use delivery::{DeliveryConfig, FailoverConfig, QueueConfig, RateLimitConfig, WorkerConfig};
pub use verification::VerificationConfig;

/// Read an environment variable and parse it, falling back to a default
/// when the variable is unset or malformed.
pub(crate) fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
