//! Redis cache client implementation
//!
//! Thin wrapper around a multiplexed async connection with retry logic at
//! connect time. Callers clone the connection per operation; the multiplexer
//! makes that cheap.

use std::time::Duration;

use redis::{aio::MultiplexedConnection, Client};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use vr_shared::CacheConfig;

use crate::InfraError;

const MAX_CONNECT_RETRIES: u32 = 3;
const CONNECT_RETRY_DELAY_MS: u64 = 100;

/// Redis client handing out multiplexed connections
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
}

impl RedisClient {
    /// Connect to Redis, retrying with exponential backoff.
    pub async fn connect(config: &CacheConfig) -> Result<Self, InfraError> {
        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfraError::Config(format!("Invalid Redis URL: {e}"))
        })?;

        let connection = Self::connect_with_retry(client).await?;
        info!("Redis client created successfully");

        Ok(Self { connection })
    }

    async fn connect_with_retry(client: Client) -> Result<MultiplexedConnection, InfraError> {
        let mut attempts = 0;
        let mut delay = CONNECT_RETRY_DELAY_MS;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < MAX_CONNECT_RETRIES => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, MAX_CONNECT_RETRIES, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5_000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfraError::Cache(e));
                }
            }
        }
    }

    /// A connection handle for one operation.
    pub fn connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }

    /// Round-trip health check.
    pub async fn ping(&self) -> Result<(), InfraError> {
        let mut conn = self.connection();
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(InfraError::Cache)?;
        Ok(())
    }
}
