//! Background worker draining the durable delivery queue.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::errors::{QueueError, SendError};
use crate::repositories::DeliveryQueue;

use super::SmsSender;

/// Deadlines and pacing for one worker.
#[derive(Debug, Clone)]
pub struct DeliveryWorkerConfig {
    /// Deadline for one claim attempt against the queue storage
    pub claim_timeout: Duration,
    /// Deadline for one provider send
    pub send_timeout: Duration,
    /// Sleep between cycles when the queue is empty or storage misbehaves
    pub idle_sleep: Duration,
}

impl Default for DeliveryWorkerConfig {
    fn default() -> Self {
        Self {
            claim_timeout: Duration::from_secs(1),
            send_timeout: Duration::from_secs(1),
            idle_sleep: Duration::from_secs(1),
        }
    }
}

impl From<&vr_shared::WorkerConfig> for DeliveryWorkerConfig {
    fn from(config: &vr_shared::WorkerConfig) -> Self {
        Self {
            claim_timeout: Duration::from_millis(config.claim_timeout_ms),
            send_timeout: Duration::from_millis(config.send_timeout_ms),
            idle_sleep: Duration::from_millis(config.idle_sleep_ms),
        }
    }
}

/// Outcome of one claim-send-report cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CycleOutcome {
    /// A claimed item was attempted and its outcome reported
    Processed,
    /// Nothing was eligible for claim
    Idle,
    /// The queue storage failed; the loop backs off and keeps going
    StorageError,
}

/// Perpetual claim-send-report loop over the shared delivery queue.
///
/// Any number of workers may run against the same queue with no central
/// coordinator; the claim operation's conditional update guarantees each item
/// lands on at most one of them per staleness window. This is the simplest
/// correct design for single-digit worker counts: one item per cycle, a fixed
/// idle sleep, and no prefetching.
pub struct DeliveryWorker<Q, S> {
    queue: Arc<Q>,
    sender: Arc<S>,
    config: DeliveryWorkerConfig,
}

impl<Q, S> DeliveryWorker<Q, S>
where
    Q: DeliveryQueue,
    S: SmsSender,
{
    pub fn new(queue: Arc<Q>, sender: Arc<S>, config: DeliveryWorkerConfig) -> Self {
        Self {
            queue,
            sender,
            config,
        }
    }

    /// Run until `shutdown` flips or its sender side is dropped.
    ///
    /// Storage errors never terminate the loop; they are logged and absorbed
    /// so the worker rides out transient outages.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!("delivery worker started");
        loop {
            if *shutdown.borrow() {
                break;
            }
            let outcome = tokio::select! {
                _ = shutdown.changed() => break,
                outcome = self.cycle() => outcome,
            };
            if outcome != CycleOutcome::Processed {
                tokio::select! {
                    _ = shutdown.changed() => break,
                    _ = tokio::time::sleep(self.config.idle_sleep) => {}
                }
            }
        }
        info!("delivery worker stopped");
    }

    /// One claim-send-report cycle.
    pub(crate) async fn cycle(&self) -> CycleOutcome {
        let claimed = tokio::time::timeout(self.config.claim_timeout, self.queue.claim()).await;
        let message = match claimed {
            Ok(Ok(message)) => message,
            Ok(Err(QueueError::Empty)) => return CycleOutcome::Idle,
            Ok(Err(err)) => {
                error!(error = %err, "failed to claim a waiting delivery");
                return CycleOutcome::StorageError;
            }
            Err(_) => {
                error!("claim attempt exceeded its deadline");
                return CycleOutcome::StorageError;
            }
        };

        let result = match tokio::time::timeout(
            self.config.send_timeout,
            self.sender
                .send(&message.template_id, &message.args, &message.recipients),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(SendError::Timeout),
        };

        if let Err(err) = &result {
            warn!(
                id = %message.id,
                retry_count = message.retry_count,
                max_retries = message.max_retries,
                error = %err,
                "queued delivery attempt failed"
            );
        }

        if let Err(err) = self.queue.report(message.id, result.is_ok()).await {
            error!(
                id = %message.id,
                delivered = result.is_ok(),
                error = %err,
                "delivery finished but reporting the outcome failed"
            );
        }

        CycleOutcome::Processed
    }
}
