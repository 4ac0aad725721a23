//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for VerifyRelay. It
//! provides the concrete backings behind the core contracts:
//!
//! - **Cache**: Redis and in-process implementations of the quota-protected
//!   code store
//! - **Database**: MySQL implementation of the durable delivery queue
//! - **Services**: Redis sliding-window rate limiter
//! - **SMS**: console/mock and HTTP gateway providers

/// Cache module - code store backings
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Services module - rate limiting
pub mod services;

/// SMS provider module
pub mod sms;

use vr_shared::config::{CacheConfig, DatabaseConfig, DeliveryConfig, VerificationConfig};

/// Aggregated infrastructure configuration
#[derive(Debug, Clone, Default)]
pub struct InfraConfig {
    /// Redis configuration
    pub cache: CacheConfig,
    /// MySQL configuration
    pub database: DatabaseConfig,
    /// Delivery, failover, queue, and worker configuration
    pub delivery: DeliveryConfig,
    /// Verification code configuration
    pub verification: VerificationConfig,
}

impl InfraConfig {
    /// Load the full infrastructure configuration from the environment,
    /// reading a `.env` file first when one is present.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self {
            cache: CacheConfig::from_env(),
            database: DatabaseConfig::from_env(),
            delivery: DeliveryConfig::from_env(),
            verification: VerificationConfig::from_env(),
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
