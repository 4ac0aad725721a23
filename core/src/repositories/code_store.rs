//! Quota-protected verification code store contract.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Store holding at most one live verification code per (scope, recipient)
/// pair, enforcing the resend cooldown and the verification attempt budget.
///
/// Implementations must make each operation one indivisible unit against the
/// backing store. Two interchangeable backings exist: a distributed Redis
/// store safe across processes, and a single-process in-memory store guarded
/// by a mutex. Both produce the same decisions for the same input sequence.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Store a fresh code for `(scope, recipient)`.
    ///
    /// Fails with [`DomainError::SendTooFrequent`](crate::errors::DomainError)
    /// without mutating anything while the previous code still has more than
    /// nine tenths of the configured TTL left. Otherwise the entry is
    /// overwritten with a full attempt budget and a new expiry.
    async fn set(&self, scope: &str, recipient: &str, code: &str) -> DomainResult<()>;

    /// Check `input` against the stored code, consuming one attempt.
    ///
    /// Returns `Ok(false)` for a wrong guess (the attempt is still consumed),
    /// [`DomainError::TooManyAttempts`](crate::errors::DomainError) once the
    /// budget is exhausted or the code expired, and
    /// [`DomainError::CodeNotFound`](crate::errors::DomainError) when no entry
    /// exists for the key.
    async fn verify(&self, scope: &str, recipient: &str, input: &str) -> DomainResult<bool>;
}
