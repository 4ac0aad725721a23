//! Queued delivery entity for asynchronous SMS sending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a queued delivery.
///
/// `Waiting` items are eligible for claim once their last update is older
/// than the queue's staleness window. `Success` and `Failed` are terminal;
/// rows are never deleted so the queue doubles as an audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Waiting,
    Failed,
    Success,
}

impl DeliveryStatus {
    /// Stable storage code for this status.
    pub fn code(self) -> i8 {
        match self {
            DeliveryStatus::Waiting => 0,
            DeliveryStatus::Failed => 1,
            DeliveryStatus::Success => 2,
        }
    }

    /// Inverse of [`DeliveryStatus::code`].
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(DeliveryStatus::Waiting),
            1 => Some(DeliveryStatus::Failed),
            2 => Some(DeliveryStatus::Success),
            _ => None,
        }
    }
}

/// One outbound message parked in the durable delivery queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedMessage {
    /// Unique identifier of the queue item
    pub id: Uuid,

    /// Provider template the message renders through
    pub template_id: String,

    /// Ordered template arguments
    pub args: Vec<String>,

    /// Recipients of the message
    pub recipients: Vec<String>,

    /// Delivery attempts consumed so far; only ever increases
    pub retry_count: u32,

    /// Attempts allowed before the item is marked failed
    pub max_retries: u32,

    /// Current lifecycle state
    pub status: DeliveryStatus,

    /// Last mutation time; doubles as the claim lease timestamp
    pub updated_at: DateTime<Utc>,
}

impl QueuedMessage {
    /// Create a fresh waiting item ready to be enqueued.
    pub fn new(
        template_id: impl Into<String>,
        args: Vec<String>,
        recipients: Vec<String>,
        max_retries: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            template_id: template_id.into(),
            args,
            recipients,
            retry_count: 0,
            max_retries,
            status: DeliveryStatus::Waiting,
            updated_at: Utc::now(),
        }
    }

    /// Whether this item has consumed all of its delivery attempts.
    pub fn retries_exhausted(&self) -> bool {
        self.retry_count >= self.max_retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_starts_waiting_with_zero_retries() {
        let message = QueuedMessage::new(
            "1932694",
            vec!["123456".to_string()],
            vec!["17812345678".to_string()],
            3,
        );

        assert_eq!(message.status, DeliveryStatus::Waiting);
        assert_eq!(message.retry_count, 0);
        assert!(!message.retries_exhausted());
    }

    #[test]
    fn retries_exhausted_at_max() {
        let mut message = QueuedMessage::new("tpl", vec![], vec![], 3);
        message.retry_count = 3;
        assert!(message.retries_exhausted());
    }

    #[test]
    fn status_codes_round_trip() {
        for status in [
            DeliveryStatus::Waiting,
            DeliveryStatus::Failed,
            DeliveryStatus::Success,
        ] {
            assert_eq!(DeliveryStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(DeliveryStatus::from_code(7), None);
    }
}
