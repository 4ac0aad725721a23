//! Mock SMS provider
//!
//! Logs messages instead of delivering them. Useful for development
//! environments and for exercising the failover and worker machinery in
//! tests without a real vendor account.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use vr_core::delivery::SmsSender;
use vr_core::errors::SendError;

use super::mask_recipient;

/// SMS provider that records instead of sending
#[derive(Clone)]
pub struct MockSmsSender {
    /// Number of messages accepted so far
    sent: Arc<AtomicU64>,
    /// When set, every send fails as if the vendor were down
    simulate_failure: bool,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// A mock that rejects every send.
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(AtomicU64::new(0)),
            simulate_failure: true,
        }
    }

    /// Messages accepted so far.
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }
}

impl Default for MockSmsSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SendError> {
        if self.simulate_failure {
            warn!(template_id = template_id, "mock SMS provider simulating failure");
            return Err(SendError::Provider {
                message: "mock provider configured to fail".to_string(),
            });
        }

        let masked: Vec<String> = recipients.iter().map(|r| mask_recipient(r)).collect();
        info!(
            template_id = template_id,
            args = ?args,
            recipients = ?masked,
            "mock SMS delivered"
        );

        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_accepted_messages() {
        let sender = MockSmsSender::new();
        sender
            .send("tpl", &["123456".to_string()], &["17812345678".to_string()])
            .await
            .unwrap();
        sender
            .send("tpl", &["654321".to_string()], &["17812345678".to_string()])
            .await
            .unwrap();
        assert_eq!(sender.sent_count(), 2);
    }

    #[tokio::test]
    async fn failing_mock_rejects_sends() {
        let sender = MockSmsSender::failing();
        let err = sender.send("tpl", &[], &[]).await.unwrap_err();
        assert!(matches!(err, SendError::Provider { .. }));
        assert_eq!(sender.sent_count(), 0);
    }
}
