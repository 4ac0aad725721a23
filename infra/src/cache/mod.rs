//! Cache module - the two interchangeable code store backings
//!
//! `RedisCodeStore` is the distributed, multi-process-safe variant; every
//! operation runs as a single Lua script so concurrent callers cannot race a
//! read against a write. `LocalCodeStore` is the single-process variant: a
//! bounded LRU map behind a mutex. Both make the same decisions for the same
//! input sequence.

pub mod local_code_store;
pub mod redis_client;
pub mod redis_code_store;

pub use local_code_store::LocalCodeStore;
pub use redis_client::RedisClient;
pub use redis_code_store::RedisCodeStore;
