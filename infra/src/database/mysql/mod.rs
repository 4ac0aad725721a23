//! MySQL repository implementations

mod delivery_queue_impl;

pub use delivery_queue_impl::MySqlDeliveryQueue;
