//! Single-process verification code store.
//!
//! A bounded LRU map behind a mutex. Explicitly not safe across processes -
//! the lock only serializes callers inside this one; deployments with more
//! than one instance need [`RedisCodeStore`](super::RedisCodeStore). Expired
//! entries are not swept eagerly; they are rejected on access and eventually
//! fall out of the LRU.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use lru::LruCache;

use vr_core::errors::{DomainError, DomainResult};
use vr_core::repositories::CodeStore;

const MAX_ATTEMPTS: i32 = 3;

struct CodeEntry {
    code: String,
    attempts_left: i32,
    expires_at: DateTime<Utc>,
}

/// In-memory implementation of [`CodeStore`]
pub struct LocalCodeStore {
    entries: Mutex<LruCache<String, CodeEntry>>,
    ttl: Duration,
}

impl LocalCodeStore {
    /// Create a store holding at most `capacity` live codes, each valid for
    /// `ttl`.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    fn key(scope: &str, recipient: &str) -> String {
        format!("verify_code:{scope}:{recipient}")
    }

    /// Resend is blocked while more than this much TTL remains.
    fn resend_threshold(&self) -> Duration {
        self.ttl * 9 / 10
    }
}

#[async_trait]
impl CodeStore for LocalCodeStore {
    async fn set(&self, scope: &str, recipient: &str, code: &str) -> DomainResult<()> {
        let mut entries = self.entries.lock().map_err(|_| DomainError::Internal {
            message: "code store lock poisoned".to_string(),
        })?;
        let key = Self::key(scope, recipient);
        let now = Utc::now();

        if let Some(entry) = entries.get(&key) {
            if entry.expires_at - now > self.resend_threshold() {
                return Err(DomainError::SendTooFrequent);
            }
        }

        entries.put(
            key,
            CodeEntry {
                code: code.to_string(),
                attempts_left: MAX_ATTEMPTS,
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }

    async fn verify(&self, scope: &str, recipient: &str, input: &str) -> DomainResult<bool> {
        let mut entries = self.entries.lock().map_err(|_| DomainError::Internal {
            message: "code store lock poisoned".to_string(),
        })?;
        let key = Self::key(scope, recipient);
        let now = Utc::now();

        let entry = entries.get_mut(&key).ok_or(DomainError::CodeNotFound)?;

        // An expired code must never validate, however many attempts remain.
        if entry.expires_at <= now {
            return Err(DomainError::TooManyAttempts);
        }
        if entry.attempts_left <= 0 {
            return Err(DomainError::TooManyAttempts);
        }

        entry.attempts_left -= 1;
        Ok(entry.code == input)
    }
}
