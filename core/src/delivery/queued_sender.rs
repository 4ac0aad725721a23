//! Synchronous-to-asynchronous dispatch through the durable queue.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::QueuedMessage;
use crate::errors::SendError;
use crate::repositories::DeliveryQueue;

use super::SmsSender;

/// Decides whether a send goes through the synchronous provider path or is
/// parked in the durable queue for the background worker.
pub trait DispatchPolicy: Send + Sync {
    fn should_queue(&self) -> bool;
}

/// Policy that routes every send through the queue.
///
/// The original system hard-codes this choice; a response-time or error-rate
/// based heuristic would slot in here without touching the sender.
pub struct AlwaysQueue;

impl DispatchPolicy for AlwaysQueue {
    fn should_queue(&self) -> bool {
        true
    }
}

/// Sender that either delegates directly or enqueues for asynchronous retry.
pub struct QueuedSender<Q, S, P = AlwaysQueue> {
    queue: Arc<Q>,
    direct: Arc<S>,
    policy: P,
    max_retries: u32,
}

impl<Q, S, P> QueuedSender<Q, S, P>
where
    Q: DeliveryQueue,
    S: SmsSender,
    P: DispatchPolicy,
{
    pub fn new(queue: Arc<Q>, direct: Arc<S>, policy: P, max_retries: u32) -> Self {
        Self {
            queue,
            direct,
            policy,
            max_retries,
        }
    }
}

#[async_trait]
impl<Q, S, P> SmsSender for QueuedSender<Q, S, P>
where
    Q: DeliveryQueue,
    S: SmsSender,
    P: DispatchPolicy,
{
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SendError> {
        if self.policy.should_queue() {
            let message = QueuedMessage::new(
                template_id,
                args.to_vec(),
                recipients.to_vec(),
                self.max_retries,
            );
            self.queue.enqueue(message).await?;
            return Ok(());
        }

        self.direct.send(template_id, args, recipients).await
    }
}
