//! Rate-limited sender decorator.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::errors::SendError;

use super::SmsSender;

/// Failure inside the rate limiter itself (not an admission rejection).
#[derive(Error, Debug)]
#[error("Rate limiter failure: {0}")]
pub struct LimitError(pub String);

/// Sliding-window admission check keyed by provider identity.
///
/// Implemented by the infrastructure layer; `Ok(true)` means the key is over
/// its budget and the caller must not attempt a send.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn limit(&self, key: &str) -> Result<bool, LimitError>;
}

/// Sender that consults a rate limiter before delegating.
///
/// A limiter failure is treated conservatively: the send is rejected rather
/// than risking an unmetered burst against a fragile downstream.
pub struct RateLimitedSender<S> {
    inner: Arc<S>,
    limiter: Arc<dyn RateLimiter>,
    key: String,
}

impl<S: SmsSender> RateLimitedSender<S> {
    pub fn new(inner: Arc<S>, limiter: Arc<dyn RateLimiter>, key: impl Into<String>) -> Self {
        Self {
            inner,
            limiter,
            key: key.into(),
        }
    }
}

#[async_trait]
impl<S: SmsSender> SmsSender for RateLimitedSender<S> {
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SendError> {
        let limited = self
            .limiter
            .limit(&self.key)
            .await
            .map_err(|err| SendError::Provider {
                message: format!("rate limiter check failed: {err}"),
            })?;

        if limited {
            warn!(key = %self.key, "send rejected by rate limiter");
            return Err(SendError::RateLimited);
        }

        self.inner.send(template_id, args, recipients).await
    }
}
