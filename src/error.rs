//! Error taxonomy for generation and resolution.
//!
//! Cache failures never appear here: the cache tier is best-effort and its
//! errors are absorbed inside the caching layer (degrading to miss behavior).

use crate::utils::code_validator::ValidationReason;

/// Errors surfaced by the short-code engine.
#[derive(Debug, thiserror::Error)]
pub enum CodeError {
    /// A candidate or custom code failed validation. Carries the
    /// machine-readable reason; suggestions are attached by the reporting
    /// layer, not the error.
    #[error("invalid short code: {reason}")]
    Validation { reason: ValidationReason },

    /// A generation request is missing an input its strategy requires
    /// (brand prefix, hash source, or pattern). Retrying cannot help, so this
    /// is reported before the retry loop starts.
    #[error("generation request is missing required input: {0}")]
    MissingInput(&'static str),

    /// Every retry attempt produced a candidate that was invalid or taken.
    #[error("could not find a unique code in {attempts} attempts")]
    Exhausted { attempts: u32 },

    /// The durable store's unique constraint rejected an insert. The caller
    /// should treat the candidate as taken and retry with a fresh one.
    #[error("short code already exists")]
    CodeTaken,

    /// The durable store could not be reached or answered with a non-constraint
    /// failure. Absence is reported as `Ok(None)` on lookups, so callers can
    /// always tell "doesn't exist" apart from "couldn't check".
    #[error("durable store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CodeError {
    pub fn validation(reason: ValidationReason) -> Self {
        Self::Validation { reason }
    }

    /// Returns true when the error means the code is confirmed in use.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::CodeTaken)
    }
}

impl From<sqlx::Error> for CodeError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_code(&e) {
            return Self::CodeTaken;
        }
        Self::StoreUnavailable(e.to_string())
    }
}

/// Checks whether a sqlx error is the unique-index violation on the links
/// code column, the store's final say on a collision.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some("links_code_key"))
}
