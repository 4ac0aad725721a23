//! SMS delivery layer
//!
//! This module provides the send contract shared by every provider and the
//! decorators composed around it:
//! - [`FailoverSender`] - per-call round-robin rotation over N providers
//! - [`TimeoutFailoverSender`] - consecutive-timeout-triggered rotation
//! - [`RateLimitedSender`] - sliding-window admission check before any provider
//! - [`QueuedSender`] - synchronous-to-asynchronous dispatch through the
//!   durable queue
//! - [`DeliveryWorker`] - perpetual claim-send-report loop draining the queue

use async_trait::async_trait;

use crate::errors::SendError;

mod failover;
mod queued_sender;
mod rate_limited;
mod timeout_failover;
mod worker;

#[cfg(test)]
mod tests;

pub use failover::FailoverSender;
pub use queued_sender::{AlwaysQueue, DispatchPolicy, QueuedSender};
pub use rate_limited::{LimitError, RateLimitedSender, RateLimiter};
pub use timeout_failover::TimeoutFailoverSender;
pub use worker::{DeliveryWorker, DeliveryWorkerConfig};

/// Send contract hiding the differences between SMS vendors.
///
/// Implementations cover concrete providers as well as the decorators in this
/// module, so senders compose: a queue-backed sender can wrap a rate-limited
/// failover of several providers.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Deliver one message rendered from `template_id` and `args` to
    /// `recipients`.
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SendError>;
}
