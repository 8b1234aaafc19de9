//! Caching infrastructure for the service layer.
//!
//! A small string-valued cache port with a Redis adapter, plus the typed
//! read-through and invalidation helpers the services build on.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use redis_cache::{RedisCacheService, DEFAULT_TTL, OPERATION_TIMEOUT};
