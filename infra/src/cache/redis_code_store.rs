//! Distributed verification code store on Redis.
//!
//! Both operations execute as one Lua script each, so the quota decision and
//! its mutation happen in a single indivisible unit - concurrent callers from
//! any number of processes cannot interleave a read with a stale write. The
//! value key's TTL doubles as the resend-cooldown ledger, and the attempt
//! counter lives beside it under the same expiry.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use redis::Script;
use tracing::debug;

use vr_core::errors::{DomainError, DomainResult};
use vr_core::repositories::CodeStore;

use crate::cache::RedisClient;

/// Verification attempts granted per stored code
const MAX_ATTEMPTS: i64 = 3;

static SET_CODE: Lazy<Script> = Lazy::new(|| Script::new(include_str!("scripts/set_code.lua")));
static VERIFY_CODE: Lazy<Script> =
    Lazy::new(|| Script::new(include_str!("scripts/verify_code.lua")));

/// Redis-backed implementation of [`CodeStore`]
#[derive(Clone)]
pub struct RedisCodeStore {
    client: RedisClient,
    ttl: Duration,
}

impl RedisCodeStore {
    /// Create a store whose codes live for `ttl`.
    pub fn new(client: RedisClient, ttl: Duration) -> Self {
        Self { client, ttl }
    }

    fn key(scope: &str, recipient: &str) -> String {
        format!("verify_code:{scope}:{recipient}")
    }

    /// Resend is blocked while more than this many seconds of TTL remain.
    fn resend_threshold_secs(&self) -> u64 {
        self.ttl.as_secs() * 9 / 10
    }
}

fn storage_unavailable(err: redis::RedisError) -> DomainError {
    DomainError::StorageUnavailable {
        message: err.to_string(),
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn set(&self, scope: &str, recipient: &str, code: &str) -> DomainResult<()> {
        let mut conn = self.client.connection();
        let status: i64 = SET_CODE
            .key(Self::key(scope, recipient))
            .arg(code)
            .arg(self.ttl.as_secs())
            .arg(self.resend_threshold_secs())
            .arg(MAX_ATTEMPTS)
            .invoke_async(&mut conn)
            .await
            .map_err(storage_unavailable)?;

        match status {
            0 => Ok(()),
            -1 => Err(DomainError::SendTooFrequent),
            other => Err(DomainError::Internal {
                message: format!("unexpected set_code script result: {other}"),
            }),
        }
    }

    async fn verify(&self, scope: &str, recipient: &str, input: &str) -> DomainResult<bool> {
        let mut conn = self.client.connection();
        let status: i64 = VERIFY_CODE
            .key(Self::key(scope, recipient))
            .arg(input)
            .invoke_async(&mut conn)
            .await
            .map_err(storage_unavailable)?;

        debug!(scope = scope, status = status, "verify_code script returned");

        match status {
            0 => Ok(true),
            -2 => Ok(false),
            -1 => Err(DomainError::TooManyAttempts),
            other => Err(DomainError::Internal {
                message: format!("unexpected verify_code script result: {other}"),
            }),
        }
    }
}
