//! Cache tier trait, entry encoding, and error types.

use async_trait::async_trait;
use std::fmt;

use crate::domain::entities::LinkSnapshot;

/// Sentinel value marking a code as confirmed absent (negative cache entry).
const NEGATIVE_SENTINEL: &str = "__absent__";

/// Namespace prefix for link lookup keys.
const KEY_PREFIX: &str = "link:";

/// Builds the namespaced cache key for a short code.
pub fn link_key(code: &str) -> String {
    format!("{}{}", KEY_PREFIX, code)
}

/// Errors that can occur during cache operations.
///
/// These never cross the engine's public API; the resolver absorbs them and
/// degrades to miss behavior.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// What the cache knows about a short code.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    /// Positive entry: a snapshot of the link.
    Hit(LinkSnapshot),
    /// Confirmed absent; the durable store was consulted and found nothing.
    NegativeHit,
    /// Unknown: not cached, expired, or the cache tier misbehaved.
    Miss,
}

/// Serializes a snapshot into a positive cache value.
pub fn encode_snapshot(snapshot: &LinkSnapshot) -> Option<String> {
    serde_json::to_string(snapshot).ok()
}

/// The negative cache value.
pub fn negative_value() -> &'static str {
    NEGATIVE_SENTINEL
}

/// Decodes a raw cache value into an entry.
///
/// Undecodable values map to `Miss` so a corrupt entry falls through to the
/// durable store instead of breaking resolution.
pub fn decode_entry(value: &str) -> CacheEntry {
    if value == NEGATIVE_SENTINEL {
        return CacheEntry::NegativeHit;
    }

    match serde_json::from_str::<LinkSnapshot>(value) {
        Ok(snapshot) => CacheEntry::Hit(snapshot),
        Err(_) => CacheEntry::Miss,
    }
}

/// Injected key-value cache client with TTL semantics.
///
/// Implementations must be thread-safe and handle errors gracefully without
/// disrupting the application (cache failures degrade to durable-store
/// lookups). A cache timeout is reported as a miss or an error, never as a
/// negative hit.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed tier with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheTier: Send + Sync {
    /// Fetches the raw value for a key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on hit
    /// - `Ok(None)` on miss
    ///
    /// # Errors
    ///
    /// Production implementations should log failures and return `Ok(None)`
    /// (fail-open). Callers treat `Err` identically to a miss.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value under a key with the given TTL.
    ///
    /// # Errors
    ///
    /// Should not propagate errors; implementations log and return `Ok(())`
    /// so a cache outage never aborts the triggering business operation.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Removes a key.
    ///
    /// Used when a link is deleted or its code changes.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
