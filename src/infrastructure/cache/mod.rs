//! Caching layer for fast short-code lookups.
//!
//! Provides a [`CacheTier`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed tier
//! - [`NullCache`] - No-op implementation for testing/disabled caching

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{
    CacheEntry, CacheError, CacheResult, CacheTier, decode_entry, encode_snapshot, link_key,
    negative_value,
};

#[cfg(test)]
pub use service::MockCacheTier;
