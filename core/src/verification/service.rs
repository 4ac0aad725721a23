//! Main verification code service implementation

use std::sync::Arc;

use rand::Rng;
use tracing::{error, info};

use crate::delivery::SmsSender;
use crate::errors::{DomainError, DomainResult, SendError};
use crate::repositories::CodeStore;

use super::config::CodeServiceConfig;

/// Length of a rendered verification code
pub const CODE_LENGTH: usize = 6;

/// Service issuing and verifying one-time codes per (scope, recipient) pair.
pub struct CodeService<C: CodeStore, S: SmsSender> {
    store: Arc<C>,
    sender: Arc<S>,
    config: CodeServiceConfig,
}

impl<C: CodeStore, S: SmsSender> CodeService<C, S> {
    pub fn new(store: Arc<C>, sender: Arc<S>, config: CodeServiceConfig) -> Self {
        Self {
            store,
            sender,
            config,
        }
    }

    /// Generate a fresh code, persist it under quota protection, and hand the
    /// rendered message to the delivery path.
    ///
    /// `SendTooFrequent` propagates unchanged; storage and provider failures
    /// are mapped to `DomainError::Internal` before reaching the caller.
    pub async fn send(&self, scope: &str, recipient: &str) -> DomainResult<()> {
        let code = generate_code();

        self.store
            .set(scope, recipient, &code)
            .await
            .map_err(internalize)?;

        info!(
            scope = scope,
            recipient = %mask_recipient(recipient),
            "verification code stored, dispatching delivery"
        );

        self.sender
            .send(
                &self.config.template_id,
                &[code],
                &[recipient.to_string()],
            )
            .await
            .map_err(|err| match err {
                SendError::RateLimited => DomainError::RateLimited,
                err => {
                    error!(
                        scope = scope,
                        recipient = %mask_recipient(recipient),
                        error = %err,
                        "verification code delivery failed"
                    );
                    DomainError::Internal {
                        message: format!("verification code delivery failed: {err}"),
                    }
                }
            })
    }

    /// Check `input` against the stored code for `(scope, recipient)`.
    pub async fn verify(&self, scope: &str, recipient: &str, input: &str) -> DomainResult<bool> {
        self.store
            .verify(scope, recipient, input)
            .await
            .map_err(internalize)
    }
}

/// Uniformly random code in `[0, 1_000_000)`, zero-padded so short draws
/// still render as six digits.
fn generate_code() -> String {
    let value: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{value:06}")
}

/// Business errors pass through; storage failures become a generic internal
/// error so callers never observe the backing store directly.
fn internalize(err: DomainError) -> DomainError {
    match err {
        DomainError::StorageUnavailable { message } => DomainError::Internal { message },
        err => err,
    }
}

/// Mask a recipient for logging, keeping only the last 4 characters.
fn mask_recipient(recipient: &str) -> String {
    if recipient.len() <= 4 {
        "****".to_string()
    } else {
        format!("***{}", &recipient[recipient.len() - 4..])
    }
}
