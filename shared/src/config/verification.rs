//! Verification code lifecycle configuration

use serde::{Deserialize, Serialize};

/// Verification code configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Seconds a stored code stays valid
    pub code_ttl_secs: u64,

    /// Provider template used to render verification messages
    pub template_id: String,

    /// Capacity of the in-process code store (ignored by the Redis store)
    pub local_capacity: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_secs: 600,
            template_id: String::from("1932694"),
            local_capacity: 4096,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            code_ttl_secs: super::env_parse("VERIFICATION_CODE_TTL_SECS", 600),
            template_id: std::env::var("VERIFICATION_TEMPLATE_ID")
                .unwrap_or_else(|_| "1932694".to_string()),
            local_capacity: super::env_parse("VERIFICATION_LOCAL_CAPACITY", 4096),
        }
    }
}
