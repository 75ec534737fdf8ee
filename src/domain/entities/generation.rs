//! Generation request value object.

/// Candidate-producing algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Uniform draws from the 62-symbol alphanumeric alphabet.
    #[default]
    Random,
    /// Alternating consonant/vowel classes for speakable codes.
    Pronounceable,
    /// Caller-supplied brand prefix plus a lowercase-alphanumeric suffix.
    Branded,
    /// A common word plus a numeric tail.
    Memorable,
    /// Base-62 encoding of an atomically incremented counter.
    Sequential,
    /// Deterministic 32-bit rolling hash of the source URL.
    HashBased,
    /// Template expansion: `A` letter, `N` digit, `X` alphanumeric.
    CustomPattern,
}

/// Ephemeral per-call options for [`generate`].
///
/// Created per call and discarded after use; carries no identity. `None`
/// fields fall back to engine defaults.
///
/// [`generate`]: crate::application::services::GeneratorService::generate
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub strategy: Strategy,
    /// Target code length before prefix/suffix. Strategy-specific defaults
    /// apply when absent.
    pub length: Option<usize>,
    /// Prepended to the candidate for every strategy except `Branded`, which
    /// consumes it as the brand itself.
    pub prefix: Option<String>,
    /// Appended to the candidate after strategy execution.
    pub suffix: Option<String>,
    /// Overrides the draw alphabet for the `Random` strategy.
    pub charset: Option<String>,
    /// Template for `CustomPattern`.
    pub pattern: Option<String>,
    /// Source URL for `HashBased`.
    pub hash_source: Option<String>,
    /// Attempt budget; engine default when absent.
    pub max_retries: Option<u32>,
}

impl GenerationRequest {
    /// Request with the given strategy and all other options defaulted.
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}
