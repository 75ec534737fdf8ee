//! Redis-backed sequence counter.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::info;

use crate::domain::repositories::SequenceStore;
use crate::error::CodeError;

/// Sequence counter backed by Redis `INCR`.
///
/// `INCR` executes atomically on the server, so concurrent callers always
/// observe distinct, strictly increasing values. Run Redis with persistence
/// enabled; the counter must survive restarts or sequential codes would
/// collide with previously issued ones.
pub struct RedisSequenceStore {
    client: ConnectionManager,
}

impl RedisSequenceStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::StoreUnavailable`] if the connection cannot be
    /// established.
    pub async fn connect(redis_url: &str) -> Result<Self, CodeError> {
        let client = Client::open(redis_url)
            .map_err(|e| CodeError::StoreUnavailable(format!("invalid Redis URL: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CodeError::StoreUnavailable(format!("Redis connection failed: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CodeError::StoreUnavailable(format!("Redis PING failed: {}", e)))?;

        info!("✓ Sequence counter connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl SequenceStore for RedisSequenceStore {
    async fn increment_and_get(&self, counter_key: &str) -> Result<u64, CodeError> {
        let mut conn = self.client.clone();

        conn.incr::<_, _, u64>(counter_key, 1)
            .await
            .map_err(|e| CodeError::StoreUnavailable(format!("Redis INCR failed: {}", e)))
    }
}
