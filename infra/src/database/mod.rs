//! Database module - MySQL implementations using SQLx

pub mod mysql;

pub use mysql::MySqlDeliveryQueue;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, Pool};
use std::time::Duration;
use tracing::info;

use vr_shared::DatabaseConfig;

use crate::InfraError;

/// Open a MySQL connection pool from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<Pool<MySql>, InfraError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .max_lifetime(Duration::from_secs(config.max_lifetime))
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "MySQL connection pool created"
    );

    Ok(pool)
}
