//! Link creation, rename, and deletion orchestration.
//!
//! This is the write side of the subsystem: it composes the generator and the
//! resolver so that the documented check-then-insert race is actually closed
//! by the durable store's unique constraint, not by wishful thinking.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::entities::{GenerationRequest, LinkSnapshot, NewLink};
use crate::domain::repositories::{LinkStore, SequenceStore};
use crate::error::CodeError;
use crate::utils::code_validator::validate_code;

use super::generator_service::GeneratorService;
use super::resolver_service::ResolverService;

/// How many fresh candidates to try when inserts lose the race.
///
/// Each pass runs a full `generate` budget, so this only trips when the key
/// space is badly misconfigured or pathologically contended.
const MAX_INSERT_ATTEMPTS: u32 = 3;

/// Options for creating a link.
#[derive(Debug, Clone, Default)]
pub struct CreateLink {
    pub long_url: String,
    /// Caller-chosen code; validated and checked for availability. When
    /// absent, a code is generated per `generation`.
    pub custom_code: Option<String>,
    /// Generation options used when no custom code is given.
    pub generation: GenerationRequest,
    pub permanent: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Service for creating and maintaining short links.
///
/// Owns the cache write path: eager positive entries on create, invalidation
/// of the old key on rename, invalidation on delete. Cache failures never
/// abort the triggering operation.
pub struct LinkService<L: LinkStore, S: SequenceStore> {
    store: Arc<L>,
    resolver: Arc<ResolverService<L>>,
    generator: Arc<GeneratorService<L, S>>,
}

impl<L: LinkStore, S: SequenceStore> LinkService<L, S> {
    /// Creates a new link service.
    pub fn new(
        store: Arc<L>,
        resolver: Arc<ResolverService<L>>,
        generator: Arc<GeneratorService<L, S>>,
    ) -> Self {
        Self {
            store,
            resolver,
            generator,
        }
    }

    /// Creates a short link.
    ///
    /// With a custom code: validates it, checks availability, and inserts;
    /// a unique-constraint rejection surfaces as [`CodeError::CodeTaken`].
    ///
    /// Without one: generates a candidate and inserts. When the insert loses
    /// the race to a concurrent creation (the advisory check saw "free" but
    /// the constraint says otherwise), the whole generate-and-insert sequence
    /// retries with a fresh candidate.
    ///
    /// On success a positive cache entry is written eagerly; the first
    /// redirect does not pay for a store round-trip.
    pub async fn create_link(&self, input: CreateLink) -> Result<LinkSnapshot, CodeError> {
        if let Some(custom) = &input.custom_code {
            return self.create_with_custom_code(custom, &input).await;
        }

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let code = self.generator.generate(&input.generation).await?;

            match self.insert(code, &input).await {
                Ok(snapshot) => return Ok(snapshot),
                Err(CodeError::CodeTaken) => {
                    // Post-hoc collision: another writer claimed the code
                    // between our uniqueness check and the insert.
                    warn!("Insert attempt {} lost the code race, regenerating", attempt);
                }
                Err(e) => return Err(e),
            }
        }

        Err(CodeError::Exhausted {
            attempts: MAX_INSERT_ATTEMPTS,
        })
    }

    /// Renames a link's short code.
    ///
    /// The old code's cache entry is deleted and the new snapshot is primed,
    /// so the two codes never both resolve to the link once the cache
    /// converges. Returns `Ok(None)` when no link carries `old_code`.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::Validation`] for an invalid new code,
    /// [`CodeError::CodeTaken`] when the new code is already claimed.
    pub async fn rename_link(
        &self,
        old_code: &str,
        new_code: &str,
    ) -> Result<Option<LinkSnapshot>, CodeError> {
        validate_code(new_code).map_err(CodeError::validation)?;

        let renamed = self.store.rename_code(old_code, new_code).await?;

        if let Some(snapshot) = &renamed {
            self.resolver.invalidate(old_code).await;
            self.resolver.prime(snapshot).await;
            debug!("Renamed link {} -> {}", old_code, new_code);
        }

        Ok(renamed)
    }

    /// Soft-deletes a link and drops its cache entry.
    ///
    /// Returns `Ok(false)` when no non-deleted link carries the code.
    pub async fn delete_link(&self, code: &str) -> Result<bool, CodeError> {
        let deleted = self.store.soft_delete(code).await?;

        if deleted {
            self.resolver.invalidate(code).await;
            debug!("Deleted link {}", code);
        }

        Ok(deleted)
    }

    async fn create_with_custom_code(
        &self,
        custom: &str,
        input: &CreateLink,
    ) -> Result<LinkSnapshot, CodeError> {
        validate_code(custom).map_err(CodeError::validation)?;

        // Advisory pre-check: cheap rejection for the common case. The unique
        // constraint still backs it up at insert time.
        if self.resolver.is_taken(custom).await? {
            return Err(CodeError::CodeTaken);
        }

        self.insert(custom.to_string(), input).await
    }

    async fn insert(&self, code: String, input: &CreateLink) -> Result<LinkSnapshot, CodeError> {
        let snapshot = self
            .store
            .insert(NewLink {
                code,
                long_url: input.long_url.clone(),
                permanent: input.permanent,
                expires_at: input.expires_at,
            })
            .await?;

        self.resolver.prime(&snapshot).await;

        Ok(snapshot)
    }
}
