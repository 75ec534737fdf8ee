//! Durable counter interface for the sequential strategy.

use crate::error::CodeError;
use async_trait::async_trait;

/// Atomic, durable counter source.
///
/// `increment_and_get` must be a single server-side atomic operation, never an
/// application-level read-modify-write: two concurrent callers must never see
/// the same value. Gaps are acceptable; duplicates are not.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedisSequenceStore`] - Redis `INCR`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Atomically increments the named counter and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::StoreUnavailable`] when the counter backend cannot
    /// be reached. The generator treats this as one consumed attempt.
    async fn increment_and_get(&self, counter_key: &str) -> Result<u64, CodeError>;
}
