//! # VerifyRelay Core
//!
//! Core business logic and domain layer for the VerifyRelay backend.
//! This crate contains the verification code service, the provider failover
//! state machines, the durable delivery queue contract with its worker loop,
//! and the error taxonomy shared by all of them.

pub mod delivery;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod verification;

// Re-export commonly used types for convenience
pub use delivery::*;
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use verification::*;
