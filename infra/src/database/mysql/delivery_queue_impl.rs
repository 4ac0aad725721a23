//! MySQL-backed durable delivery queue.
//!
//! The claim runs as one transaction: a `SELECT ... FOR UPDATE` locks the
//! oldest eligible row, then a single `UPDATE` bumps the retry counter and
//! refreshes the lease timestamp. Under single-digit worker counts the row
//! lock is cheap, and only one claimant can win a given row per staleness
//! window. Timestamps are stored as epoch milliseconds so eligibility is a
//! plain integer comparison. Rows are never deleted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{MySql, Pool, Row};
use tracing::{debug, info};
use uuid::Uuid;

use vr_core::domain::{DeliveryStatus, QueuedMessage};
use vr_core::errors::QueueError;
use vr_core::repositories::DeliveryQueue;

use vr_shared::QueueConfig;

use crate::InfraError;

/// Message payload persisted as one JSON text column
#[derive(Debug, Serialize, Deserialize)]
struct DeliveryPayload {
    template_id: String,
    args: Vec<String>,
    recipients: Vec<String>,
}

/// MySQL implementation of [`DeliveryQueue`]
#[derive(Clone)]
pub struct MySqlDeliveryQueue {
    pool: Pool<MySql>,
    staleness_ms: i64,
}

impl MySqlDeliveryQueue {
    pub fn new(pool: Pool<MySql>, config: &QueueConfig) -> Self {
        Self {
            pool,
            staleness_ms: config.staleness_secs as i64 * 1_000,
        }
    }

    /// Create the backing table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS delivery_queue (
                id CHAR(36) NOT NULL PRIMARY KEY,
                payload TEXT NOT NULL,
                retry_count INT UNSIGNED NOT NULL DEFAULT 0,
                max_retries INT UNSIGNED NOT NULL DEFAULT 0,
                status TINYINT NOT NULL DEFAULT 0,
                created_at BIGINT NOT NULL,
                updated_at BIGINT NOT NULL,
                KEY idx_status_updated (status, updated_at)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("delivery_queue schema ensured");
        Ok(())
    }
}

fn unavailable(err: sqlx::Error) -> QueueError {
    QueueError::Unavailable(err.to_string())
}

fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
}

#[async_trait]
impl DeliveryQueue for MySqlDeliveryQueue {
    async fn enqueue(&self, message: QueuedMessage) -> Result<(), QueueError> {
        let payload = DeliveryPayload {
            template_id: message.template_id,
            args: message.args,
            recipients: message.recipients,
        };
        let payload = serde_json::to_string(&payload)
            .map_err(|e| QueueError::Unavailable(format!("payload serialization failed: {e}")))?;
        let now = Utc::now().timestamp_millis();

        // updated_at starts at zero so the first claim does not have to wait
        // out the staleness window.
        sqlx::query(
            "INSERT INTO delivery_queue \
             (id, payload, retry_count, max_retries, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(payload)
        .bind(message.retry_count)
        .bind(message.max_retries)
        .bind(message.status.code())
        .bind(now)
        .bind(0i64)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        debug!(id = %message.id, "delivery enqueued");
        Ok(())
    }

    async fn claim(&self) -> Result<QueuedMessage, QueueError> {
        let mut tx = self.pool.begin().await.map_err(unavailable)?;
        let now = Utc::now().timestamp_millis();
        let stale_before = now - self.staleness_ms;

        let row = sqlx::query(
            "SELECT id, payload, retry_count, max_retries FROM delivery_queue \
             WHERE status = ? AND updated_at < ? \
             ORDER BY updated_at LIMIT 1 FOR UPDATE",
        )
        .bind(DeliveryStatus::Waiting.code())
        .bind(stale_before)
        .fetch_optional(&mut *tx)
        .await
        .map_err(unavailable)?;

        let Some(row) = row else {
            return Err(QueueError::Empty);
        };

        let id: String = row.try_get("id").map_err(unavailable)?;
        let payload: String = row.try_get("payload").map_err(unavailable)?;
        let retry_count: u32 = row.try_get("retry_count").map_err(unavailable)?;
        let max_retries: u32 = row.try_get("max_retries").map_err(unavailable)?;

        // Refreshing the timestamp is the lease: the row stays invisible to
        // other claimants until the staleness window elapses again.
        sqlx::query(
            "UPDATE delivery_queue SET retry_count = retry_count + 1, updated_at = ? \
             WHERE id = ?",
        )
        .bind(now)
        .bind(&id)
        .execute(&mut *tx)
        .await
        .map_err(unavailable)?;

        tx.commit().await.map_err(unavailable)?;

        let payload: DeliveryPayload = serde_json::from_str(&payload)
            .map_err(|e| QueueError::Unavailable(format!("corrupt payload for {id}: {e}")))?;
        let id = Uuid::parse_str(&id)
            .map_err(|e| QueueError::Unavailable(format!("corrupt id {id}: {e}")))?;

        debug!(id = %id, retry_count = retry_count + 1, "delivery claimed");

        Ok(QueuedMessage {
            id,
            template_id: payload.template_id,
            args: payload.args,
            recipients: payload.recipients,
            retry_count: retry_count + 1,
            max_retries,
            status: DeliveryStatus::Waiting,
            updated_at: millis_to_datetime(now),
        })
    }

    async fn report(&self, id: Uuid, succeeded: bool) -> Result<(), QueueError> {
        let now = Utc::now().timestamp_millis();

        if succeeded {
            sqlx::query("UPDATE delivery_queue SET status = ?, updated_at = ? WHERE id = ?")
                .bind(DeliveryStatus::Success.code())
                .bind(now)
                .bind(id.to_string())
                .execute(&self.pool)
                .await
                .map_err(unavailable)?;
        } else {
            // Only flips to Failed once the retry budget is spent; otherwise
            // the row stays Waiting and re-ages into eligibility.
            sqlx::query(
                "UPDATE delivery_queue SET status = ?, updated_at = ? \
                 WHERE id = ? AND retry_count >= max_retries",
            )
            .bind(DeliveryStatus::Failed.code())
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        }

        Ok(())
    }
}
