//! Shared configuration types for the VerifyRelay server
//!
//! This crate provides the configuration surface used across all server
//! modules. Each sub-module owns one concern (cache, database, delivery,
//! verification) and every config type has both a `Default` impl and a
//! `from_env()` constructor.

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    CacheConfig, DatabaseConfig, DeliveryConfig, FailoverConfig, QueueConfig,
    RateLimitConfig, VerificationConfig, WorkerConfig,
};
