//! Domain entities for queued deliveries.

pub mod queued_message;

pub use queued_message::{DeliveryStatus, QueuedMessage};
