//! Round-robin provider failover.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::SendError;

use super::SmsSender;

/// Sender that rotates through interchangeable providers on every call.
///
/// A shared counter picks the starting offset, so consecutive calls start at
/// different providers and load spreads without coordination. Within one call
/// the rotation advances past any provider that fails, up to one full lap.
pub struct FailoverSender {
    senders: Vec<Arc<dyn SmsSender>>,
    next: AtomicUsize,
}

impl FailoverSender {
    pub fn new(senders: Vec<Arc<dyn SmsSender>>) -> Self {
        Self {
            senders,
            next: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SmsSender for FailoverSender {
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SendError> {
        let length = self.senders.len();
        let start = self.next.fetch_add(1, Ordering::Relaxed);

        for offset in 0..length {
            let index = (start + offset) % length;
            match self.senders[index].send(template_id, args, recipients).await {
                Ok(()) => return Ok(()),
                // The caller asked to stop; trying another provider would
                // outlive the deadline it set.
                Err(err @ (SendError::Timeout | SendError::Cancelled)) => return Err(err),
                Err(err) => {
                    warn!(
                        provider = index,
                        error = %err,
                        "provider failed, rotating to the next one"
                    );
                }
            }
        }

        Err(SendError::AllProvidersFailed { providers: length })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::mocks::{FailWith, RecordingSender};
    use super::*;

    fn args() -> Vec<String> {
        vec!["123456".to_string()]
    }

    fn recipients() -> Vec<String> {
        vec!["17812345678".to_string()]
    }

    #[tokio::test]
    async fn first_provider_success_short_circuits() {
        let first = Arc::new(RecordingSender::succeeding());
        let second = Arc::new(RecordingSender::succeeding());
        let sender = FailoverSender::new(
            vec![first.clone() as Arc<dyn SmsSender>, second.clone()],
        );

        sender.send("tpl", &args(), &recipients()).await.unwrap();

        assert_eq!(first.calls() + second.calls(), 1);
    }

    #[tokio::test]
    async fn rotates_past_failing_provider() {
        let broken = Arc::new(RecordingSender::failing(FailWith::Provider));
        let healthy = Arc::new(RecordingSender::succeeding());
        let sender = FailoverSender::new(
            vec![broken.clone() as Arc<dyn SmsSender>, healthy.clone()],
        );

        sender.send("tpl", &args(), &recipients()).await.unwrap();

        assert_eq!(broken.calls(), 1);
        assert_eq!(healthy.calls(), 1);
    }

    #[tokio::test]
    async fn caller_deadline_is_terminal() {
        let timing_out = Arc::new(RecordingSender::failing(FailWith::Timeout));
        let never_reached = Arc::new(RecordingSender::succeeding());
        let sender = FailoverSender::new(
            vec![timing_out.clone() as Arc<dyn SmsSender>, never_reached.clone()],
        );

        let err = sender.send("tpl", &args(), &recipients()).await.unwrap_err();

        assert!(matches!(err, SendError::Timeout));
        assert_eq!(never_reached.calls(), 0);
    }

    #[tokio::test]
    async fn caller_cancellation_is_terminal() {
        let cancelled = Arc::new(RecordingSender::failing(FailWith::Cancelled));
        let never_reached = Arc::new(RecordingSender::succeeding());
        let sender = FailoverSender::new(
            vec![cancelled as Arc<dyn SmsSender>, never_reached.clone()],
        );

        let err = sender.send("tpl", &args(), &recipients()).await.unwrap_err();

        assert!(matches!(err, SendError::Cancelled));
        assert_eq!(never_reached.calls(), 0);
    }

    #[tokio::test]
    async fn exhausting_all_providers_aggregates() {
        let first = Arc::new(RecordingSender::failing(FailWith::Provider));
        let second = Arc::new(RecordingSender::failing(FailWith::Provider));
        let sender = FailoverSender::new(
            vec![first.clone() as Arc<dyn SmsSender>, second.clone()],
        );

        let err = sender.send("tpl", &args(), &recipients()).await.unwrap_err();

        assert!(matches!(err, SendError::AllProvidersFailed { providers: 2 }));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn consecutive_calls_start_at_different_providers() {
        let first = Arc::new(RecordingSender::succeeding());
        let second = Arc::new(RecordingSender::succeeding());
        let sender = FailoverSender::new(
            vec![first.clone() as Arc<dyn SmsSender>, second.clone()],
        );

        sender.send("tpl", &args(), &recipients()).await.unwrap();
        sender.send("tpl", &args(), &recipients()).await.unwrap();

        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }
}
