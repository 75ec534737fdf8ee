//! Cache-aside resolution of short codes to link snapshots.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::LinkSnapshot;
use crate::domain::repositories::LinkStore;
use crate::error::CodeError;
use crate::infrastructure::cache::{
    CacheEntry, CacheTier, decode_entry, encode_snapshot, link_key, negative_value,
};

/// Default TTL for positive cache entries, in seconds.
pub const DEFAULT_POSITIVE_TTL: u64 = 300;

/// Default TTL for negative cache entries, in seconds.
///
/// Deliberately shorter than the positive TTL so a just-created code becomes
/// visible quickly even when a negative entry was written moments earlier.
pub const DEFAULT_NEGATIVE_TTL: u64 = 60;

/// Read/write path for short-code lookups.
///
/// Serves from the cache tier, falls through to the durable store on a miss,
/// and backfills the cache with a positive or negative entry. Cache failures
/// never abort resolution: an unreadable or unreachable cache behaves like a
/// miss and every read falls through to the store until the tier recovers.
pub struct ResolverService<L: LinkStore> {
    store: Arc<L>,
    cache: Arc<dyn CacheTier>,
    positive_ttl: u64,
    negative_ttl: u64,
}

impl<L: LinkStore> ResolverService<L> {
    /// Creates a resolver with default TTLs.
    pub fn new(store: Arc<L>, cache: Arc<dyn CacheTier>) -> Self {
        Self::with_ttls(store, cache, DEFAULT_POSITIVE_TTL, DEFAULT_NEGATIVE_TTL)
    }

    /// Creates a resolver with explicit positive/negative TTLs.
    pub fn with_ttls(
        store: Arc<L>,
        cache: Arc<dyn CacheTier>,
        positive_ttl: u64,
        negative_ttl: u64,
    ) -> Self {
        Self {
            store,
            cache,
            positive_ttl,
            negative_ttl,
        }
    }

    /// Resolves a short code to a link snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(snapshot))` - found, from cache or store
    /// - `Ok(None)` - confirmed absent (negative hit or store says no)
    ///
    /// Expiry is not enforced here: an expired link still resolves, and the
    /// redirect layer decides how to answer for it via
    /// [`LinkSnapshot::is_expired`].
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::StoreUnavailable`] when the cache missed and the
    /// durable store could not answer. Never conflated with `Ok(None)`.
    pub async fn resolve(&self, code: &str) -> Result<Option<LinkSnapshot>, CodeError> {
        match self.cache_lookup(code).await {
            CacheEntry::Hit(snapshot) => Ok(Some(snapshot)),
            CacheEntry::NegativeHit => Ok(None),
            CacheEntry::Miss => {
                let found = self.store.find_by_code(code).await?;

                match &found {
                    Some(snapshot) => self.prime(snapshot).await,
                    None => self.prime_negative(code).await,
                }

                Ok(found)
            }
        }
    }

    /// Advisory uniqueness check: is this code already taken?
    ///
    /// Trusts a definite cache signal (hit or negative hit) without touching
    /// the durable store; only a miss reaches the store. The answer can go
    /// stale the moment it is produced, so the store's unique constraint stays
    /// the final authority (see [`crate::domain::repositories::LinkStore`]).
    pub async fn is_taken(&self, code: &str) -> Result<bool, CodeError> {
        self.resolve(code).await.map(|found| found.is_some())
    }

    /// Eagerly writes a positive entry for a snapshot. Best-effort.
    pub async fn prime(&self, snapshot: &LinkSnapshot) {
        let Some(value) = encode_snapshot(snapshot) else {
            warn!("Skipping cache prime for {}: unserializable snapshot", snapshot.code);
            return;
        };

        if let Err(e) = self
            .cache
            .set(&link_key(&snapshot.code), &value, self.positive_ttl)
            .await
        {
            warn!("Failed to prime cache for {}: {}", snapshot.code, e);
        }
    }

    /// Writes a negative entry marking a code as confirmed absent. Best-effort.
    pub async fn prime_negative(&self, code: &str) {
        if let Err(e) = self
            .cache
            .set(&link_key(code), negative_value(), self.negative_ttl)
            .await
        {
            warn!("Failed to write negative cache entry for {}: {}", code, e);
        }
    }

    /// Removes the cache entry for a code. Best-effort.
    pub async fn invalidate(&self, code: &str) {
        if let Err(e) = self.cache.delete(&link_key(code)).await {
            warn!("Failed to invalidate cache for {}: {}", code, e);
        }
    }

    async fn cache_lookup(&self, code: &str) -> CacheEntry {
        match self.cache.get(&link_key(code)).await {
            Ok(Some(value)) => {
                let entry = decode_entry(&value);
                if entry == CacheEntry::Miss {
                    debug!("Undecodable cache value for {}, treating as miss", code);
                }
                entry
            }
            Ok(None) => CacheEntry::Miss,
            Err(e) => {
                // Fail open: a broken cache is a miss, never a negative hit.
                warn!("Cache lookup failed for {}: {}", code, e);
                CacheEntry::Miss
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LinkStatus;
    use crate::domain::repositories::MockLinkStore;
    use crate::infrastructure::cache::{CacheError, MockCacheTier, NullCache};
    use chrono::Utc;

    fn snapshot(code: &str) -> LinkSnapshot {
        LinkSnapshot::new(
            1,
            code.to_string(),
            "https://example.com".to_string(),
            LinkStatus::Active,
            false,
            Utc::now(),
            None,
        )
    }

    #[tokio::test]
    async fn test_resolve_cache_hit_skips_store() {
        let mut store = MockLinkStore::new();
        store.expect_find_by_code().times(0);

        let mut cache = MockCacheTier::new();
        let cached = encode_snapshot(&snapshot("abc123")).unwrap();
        cache
            .expect_get()
            .withf(|key| key == "link:abc123")
            .times(1)
            .returning(move |_| Ok(Some(cached.clone())));

        let resolver = ResolverService::new(Arc::new(store), Arc::new(cache));

        let result = resolver.resolve("abc123").await.unwrap();
        assert_eq!(result.unwrap().code, "abc123");
    }

    #[tokio::test]
    async fn test_resolve_negative_hit_returns_not_found_without_store() {
        let mut store = MockLinkStore::new();
        store.expect_find_by_code().times(0);

        let mut cache = MockCacheTier::new();
        cache
            .expect_get()
            .times(1)
            .returning(|_| Ok(Some(negative_value().to_string())));

        let resolver = ResolverService::new(Arc::new(store), Arc::new(cache));

        assert!(resolver.resolve("gone42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_miss_backfills_positive_entry() {
        let mut store = MockLinkStore::new();
        store
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(snapshot(code))));

        let mut cache = MockCacheTier::new();
        cache.expect_get().times(1).returning(|_| Ok(None));
        cache
            .expect_set()
            .withf(|key, value, ttl| {
                key == "link:abc123" && value.contains("example.com") && *ttl == DEFAULT_POSITIVE_TTL
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let resolver = ResolverService::new(Arc::new(store), Arc::new(cache));

        let result = resolver.resolve("abc123").await.unwrap();
        assert!(result.is_some());
    }

    #[tokio::test]
    async fn test_resolve_miss_then_absent_writes_negative_entry_with_short_ttl() {
        let mut store = MockLinkStore::new();
        store.expect_find_by_code().times(1).returning(|_| Ok(None));

        let mut cache = MockCacheTier::new();
        cache.expect_get().times(1).returning(|_| Ok(None));
        cache
            .expect_set()
            .withf(|key, value, ttl| {
                key == "link:nosuch" && value == negative_value() && *ttl == DEFAULT_NEGATIVE_TTL
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let resolver = ResolverService::new(Arc::new(store), Arc::new(cache));

        assert!(resolver.resolve("nosuch").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_cache_error_falls_through_to_store() {
        let mut store = MockLinkStore::new();
        store
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(snapshot(code))));

        let mut cache = MockCacheTier::new();
        cache
            .expect_get()
            .times(1)
            .returning(|_| Err(CacheError::OperationError("timeout".to_string())));
        cache.expect_set().returning(|_, _, _| Ok(()));

        let resolver = ResolverService::new(Arc::new(store), Arc::new(cache));

        assert!(resolver.resolve("abc123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_resolve_store_failure_is_distinct_from_not_found() {
        let mut store = MockLinkStore::new();
        store
            .expect_find_by_code()
            .times(1)
            .returning(|_| Err(CodeError::StoreUnavailable("connection refused".to_string())));

        let resolver = ResolverService::new(Arc::new(store), Arc::new(NullCache));

        let err = resolver.resolve("abc123").await.unwrap_err();
        assert!(matches!(err, CodeError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_resolve_corrupt_cache_value_falls_through() {
        let mut store = MockLinkStore::new();
        store.expect_find_by_code().times(1).returning(|_| Ok(None));

        let mut cache = MockCacheTier::new();
        cache
            .expect_get()
            .times(1)
            .returning(|_| Ok(Some("{broken json".to_string())));
        cache.expect_set().times(1).returning(|_, _, _| Ok(()));

        let resolver = ResolverService::new(Arc::new(store), Arc::new(cache));

        assert!(resolver.resolve("abc123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_is_taken_trusts_negative_hit() {
        let mut store = MockLinkStore::new();
        store.expect_find_by_code().times(0);

        let mut cache = MockCacheTier::new();
        cache
            .expect_get()
            .times(1)
            .returning(|_| Ok(Some(negative_value().to_string())));

        let resolver = ResolverService::new(Arc::new(store), Arc::new(cache));

        assert!(!resolver.is_taken("free42").await.unwrap());
    }

    #[tokio::test]
    async fn test_is_taken_true_on_cache_hit() {
        let store = MockLinkStore::new();

        let mut cache = MockCacheTier::new();
        let cached = encode_snapshot(&snapshot("busy42")).unwrap();
        cache
            .expect_get()
            .times(1)
            .returning(move |_| Ok(Some(cached.clone())));

        let resolver = ResolverService::new(Arc::new(store), Arc::new(cache));

        assert!(resolver.is_taken("busy42").await.unwrap());
    }

    #[tokio::test]
    async fn test_prime_failure_is_swallowed() {
        let store = MockLinkStore::new();

        let mut cache = MockCacheTier::new();
        cache
            .expect_set()
            .times(1)
            .returning(|_, _, _| Err(CacheError::ConnectionError("down".to_string())));

        let resolver = ResolverService::new(Arc::new(store), Arc::new(cache));

        // Must not panic or error; priming is best-effort.
        resolver.prime(&snapshot("abc123")).await;
    }

    #[tokio::test]
    async fn test_invalidate_deletes_namespaced_key() {
        let store = MockLinkStore::new();

        let mut cache = MockCacheTier::new();
        cache
            .expect_delete()
            .withf(|key| key == "link:old-code")
            .times(1)
            .returning(|_| Ok(()));

        let resolver = ResolverService::new(Arc::new(store), Arc::new(cache));

        resolver.invalidate("old-code").await;
    }
}
