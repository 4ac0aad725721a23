//! Configuration for the verification code service

/// Configuration for [`CodeService`](super::CodeService)
#[derive(Debug, Clone)]
pub struct CodeServiceConfig {
    /// Provider template the verification message renders through
    pub template_id: String,
}

impl Default for CodeServiceConfig {
    fn default() -> Self {
        Self {
            template_id: String::from("1932694"),
        }
    }
}

impl From<&vr_shared::VerificationConfig> for CodeServiceConfig {
    fn from(config: &vr_shared::VerificationConfig) -> Self {
        Self {
            template_id: config.template_id.clone(),
        }
    }
}
