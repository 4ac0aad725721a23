//! SMS provider module
//!
//! Concrete implementations of the core send contract:
//! - **Mock**: logs messages instead of sending them, for development and
//!   tests
//! - **HTTP gateway**: generic REST SMS gateway over reqwest; transport
//!   timeouts surface as the timeout error class so the failover layer can
//!   observe provider degradation

pub mod http_sms;
pub mod mock_sms;

pub use http_sms::{HttpSmsConfig, HttpSmsSender};
pub use mock_sms::MockSmsSender;

/// Mask a recipient for logging (show only the last 4 characters)
pub fn mask_recipient(recipient: &str) -> String {
    if recipient.len() <= 4 {
        "****".to_string()
    } else {
        format!("***{}", &recipient[recipient.len() - 4..])
    }
}
