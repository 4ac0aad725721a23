//! Consecutive-timeout-triggered provider rotation.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::errors::SendError;

use super::SmsSender;

/// Sender that sticks to one active provider and rotates only after a run of
/// consecutive timeouts.
///
/// Timeouts, not generic failures, are treated as the degradation signal: a
/// success resets the streak, a timeout extends it, and any other error
/// leaves both the streak and the active provider untouched. When the streak
/// reaches the threshold the index advances by one with a compare-and-swap,
/// so concurrent callers cause a single rotation and the winner resets the
/// streak.
pub struct TimeoutFailoverSender {
    senders: Vec<Arc<dyn SmsSender>>,
    current: AtomicUsize,
    timeouts: AtomicU32,
    threshold: u32,
}

impl TimeoutFailoverSender {
    pub fn new(senders: Vec<Arc<dyn SmsSender>>, threshold: u32) -> Self {
        Self {
            senders,
            current: AtomicUsize::new(0),
            timeouts: AtomicU32::new(0),
            threshold,
        }
    }
}

#[async_trait]
impl SmsSender for TimeoutFailoverSender {
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SendError> {
        let timeouts = self.timeouts.load(Ordering::SeqCst);
        let mut index = self.current.load(Ordering::SeqCst);

        if timeouts >= self.threshold {
            let next = (index + 1) % self.senders.len();
            // A failed swap means a concurrent caller already rotated.
            if self
                .current
                .compare_exchange(index, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                self.timeouts.store(0, Ordering::SeqCst);
                info!(from = index, to = next, "rotated active SMS provider");
            }
            index = self.current.load(Ordering::SeqCst);
        }

        match self.senders[index].send(template_id, args, recipients).await {
            Ok(()) => {
                self.timeouts.store(0, Ordering::SeqCst);
                Ok(())
            }
            Err(SendError::Timeout) => {
                self.timeouts.fetch_add(1, Ordering::SeqCst);
                Err(SendError::Timeout)
            }
            Err(err) => Err(err),
        }
    }
}
