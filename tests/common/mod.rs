#![allow(dead_code)]

//! In-memory collaborator doubles for integration tests.
//!
//! These mirror the semantics the production backends provide: the link store
//! enforces code uniqueness on insert, the cache honors TTLs against tokio's
//! (pausable) clock, and the sequence counter is atomic.

use std::collections::HashMap;
use std::sync::{Mutex, Once};
use std::sync::atomic::{AtomicI64, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

use shortcode_engine::infrastructure::cache::{CacheResult, CacheTier};
use shortcode_engine::prelude::*;

static TRACING: Once = Once::new();

/// Installs the log subscriber once per test binary. Silent by default; set
/// `RUST_LOG` to see the engine's cache/retry logging while debugging a test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Link store double with a unique "index" on the code.
#[derive(Default)]
pub struct MemoryLinkStore {
    links: Mutex<HashMap<String, LinkSnapshot>>,
    next_id: AtomicI64,
    find_calls: AtomicUsize,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find_by_code` calls so far; lets tests assert that a cache
    /// hit skipped the store.
    pub fn find_count(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn insert(&self, new_link: NewLink) -> Result<LinkSnapshot, CodeError> {
        let mut links = self.links.lock().unwrap();

        if links.contains_key(&new_link.code) {
            return Err(CodeError::CodeTaken);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = LinkSnapshot::new(
            id,
            new_link.code.clone(),
            new_link.long_url,
            LinkStatus::Active,
            new_link.permanent,
            Utc::now(),
            new_link.expires_at,
        );

        links.insert(new_link.code, snapshot.clone());
        Ok(snapshot)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkSnapshot>, CodeError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.links.lock().unwrap().get(code).cloned())
    }

    async fn rename_code(
        &self,
        old_code: &str,
        new_code: &str,
    ) -> Result<Option<LinkSnapshot>, CodeError> {
        let mut links = self.links.lock().unwrap();

        if links.contains_key(new_code) {
            return Err(CodeError::CodeTaken);
        }

        let Some(mut snapshot) = links.remove(old_code) else {
            return Ok(None);
        };

        snapshot.code = new_code.to_string();
        links.insert(new_code.to_string(), snapshot.clone());
        Ok(Some(snapshot))
    }

    async fn soft_delete(&self, code: &str) -> Result<bool, CodeError> {
        Ok(self.links.lock().unwrap().remove(code).is_some())
    }
}

struct CachedValue {
    value: String,
    expires_at: Instant,
}

/// Cache tier double with real TTL expiry against tokio's clock, so tests can
/// pause and advance time deterministically.
#[derive(Default)]
pub struct MemoryCacheTier {
    entries: Mutex<HashMap<String, CachedValue>>,
}

impl MemoryCacheTier {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheTier for MemoryCacheTier {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut entries = self.entries.lock().unwrap();

        match entries.get(key) {
            Some(cached) if cached.expires_at > Instant::now() => Ok(Some(cached.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        self.entries.lock().unwrap().insert(
            key.to_string(),
            CachedValue {
                value: value.to_string(),
                expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Atomic in-process counter double.
#[derive(Default)]
pub struct MemorySequenceStore {
    counter: AtomicU64,
}

impl MemorySequenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SequenceStore for MemorySequenceStore {
    async fn increment_and_get(&self, _counter_key: &str) -> Result<u64, CodeError> {
        Ok(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Wires the full engine over in-memory collaborators.
pub struct TestEngine {
    pub store: std::sync::Arc<MemoryLinkStore>,
    pub resolver: std::sync::Arc<ResolverService<MemoryLinkStore>>,
    pub generator: std::sync::Arc<GeneratorService<MemoryLinkStore, MemorySequenceStore>>,
    pub links: LinkService<MemoryLinkStore, MemorySequenceStore>,
}

pub fn test_engine() -> TestEngine {
    use std::sync::Arc;

    init_tracing();

    let store = Arc::new(MemoryLinkStore::new());
    let cache: Arc<dyn CacheTier> = Arc::new(MemoryCacheTier::new());
    let resolver = Arc::new(ResolverService::new(store.clone(), cache));
    let generator = Arc::new(GeneratorService::new(
        resolver.clone(),
        Arc::new(MemorySequenceStore::new()),
    ));
    let links = LinkService::new(store.clone(), resolver.clone(), generator.clone());

    TestEngine {
        store,
        resolver,
        generator,
        links,
    }
}
