//! Durable delivery queue contract.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::QueuedMessage;
use crate::errors::QueueError;

/// Shared queue of pending deliveries worked by independent processes.
#[async_trait]
pub trait DeliveryQueue: Send + Sync {
    /// Persist a new waiting item.
    async fn enqueue(&self, message: QueuedMessage) -> Result<(), QueueError>;

    /// Claim exactly one eligible waiting item.
    ///
    /// Eligible means status Waiting and untouched for at least the staleness
    /// window; a freshly enqueued item counts as already stale so its first
    /// attempt is not delayed. The claim must atomically bump the retry count
    /// and refresh the lease timestamp in one conditional step so concurrent
    /// claimants cannot both win the same item. Returns [`QueueError::Empty`]
    /// when nothing is eligible - the expected idle state.
    async fn claim(&self) -> Result<QueuedMessage, QueueError>;

    /// Report the outcome of a claimed item's delivery attempt.
    ///
    /// Success marks the item Success. Failure marks it Failed only once its
    /// retry budget is exhausted; otherwise it stays Waiting and becomes
    /// re-eligible after the staleness window elapses again.
    async fn report(&self, id: Uuid, succeeded: bool) -> Result<(), QueueError>;
}
