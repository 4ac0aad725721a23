//! Verification code service
//!
//! Orchestrates code generation, quota-protected storage, and delegated
//! delivery. Whether a send takes the synchronous provider path or the
//! durable queue is decided by the sender composed underneath, not here.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::CodeServiceConfig;
pub use service::{CodeService, CODE_LENGTH};
