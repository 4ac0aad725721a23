//! Domain-specific error types and error handling.
//!
//! The taxonomy separates business outcomes callers act on (`DomainError`)
//! from delivery-side failures the failover layer routes on (`SendError`) and
//! queue signals the worker loop routes on (`QueueError`). Business errors
//! cross the service boundary unchanged; storage and provider errors are
//! mapped to `DomainError::Internal` before they reach a caller.

use thiserror::Error;

/// Business errors surfaced by the verification code service and its stores
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Verification code sent too frequently")]
    SendTooFrequent,

    #[error("Too many verification attempts")]
    TooManyAttempts,

    #[error("Verification code not found")]
    CodeNotFound,

    #[error("Request was rate limited")]
    RateLimited,

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Delivery failures produced by providers and the failover layer
#[derive(Error, Debug)]
pub enum SendError {
    /// The send did not complete within its deadline. The timeout-triggered
    /// rotation policy counts these as evidence of provider degradation.
    #[error("Send timed out")]
    Timeout,

    /// The caller cancelled the send; the failover layer stops rotating.
    #[error("Send cancelled by caller")]
    Cancelled,

    /// Rejected before any provider attempt by the rate limiter.
    #[error("Send rejected by rate limiter")]
    RateLimited,

    /// Every provider in the rotation was tried and none succeeded.
    #[error("All {providers} SMS providers failed")]
    AllProvidersFailed { providers: usize },

    /// A provider rejected the message or its transport failed.
    #[error("Provider failure: {message}")]
    Provider { message: String },

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Outcomes of delivery queue operations
#[derive(Error, Debug)]
pub enum QueueError {
    /// No waiting item is ready for claim. Expected idle state, not a failure.
    #[error("No waiting delivery is ready for claim")]
    Empty,

    #[error("Queue storage unavailable: {0}")]
    Unavailable(String),
}
