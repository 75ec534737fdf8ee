//! Durable store interface for short link lookups and inserts.

use crate::domain::entities::{LinkSnapshot, NewLink};
use crate::error::CodeError;
use async_trait::async_trait;

/// Durable store for link records, keyed by short code.
///
/// The store owns the unique index on the code column. The cache tier and the
/// advisory uniqueness check only reduce how often that constraint fires;
/// they never replace it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Inserts a new link record.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::CodeTaken`] when the unique constraint on the code
    /// column rejects the insert (another caller won the race for this code).
    /// Returns [`CodeError::StoreUnavailable`] on other database errors.
    async fn insert(&self, new_link: NewLink) -> Result<LinkSnapshot, CodeError>;

    /// Finds a non-deleted link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(snapshot))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::StoreUnavailable`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<LinkSnapshot>, CodeError>;

    /// Renames a link's short code.
    ///
    /// Returns the updated snapshot, or `Ok(None)` when no non-deleted link
    /// carries `old_code`.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::CodeTaken`] when `new_code` is already in use.
    /// Returns [`CodeError::StoreUnavailable`] on other database errors.
    async fn rename_code(
        &self,
        old_code: &str,
        new_code: &str,
    ) -> Result<Option<LinkSnapshot>, CodeError>;

    /// Soft-deletes a link by code.
    ///
    /// Returns `Ok(true)` if the link was found and deleted, `Ok(false)` if
    /// not found or already deleted.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::StoreUnavailable`] on database errors.
    async fn soft_delete(&self, code: &str) -> Result<bool, CodeError>;
}
