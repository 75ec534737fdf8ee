//! Short code generation orchestration.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{GenerationRequest, Strategy};
use crate::domain::repositories::{LinkStore, SequenceStore};
use crate::error::CodeError;
use crate::utils::code_validator::{ValidationReason, validate_code};
use crate::utils::strategies;

use super::resolver_service::ResolverService;

/// Attempt budget when neither the request nor the service configures one.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Generated code length when neither the request nor the service
/// configures one. Applies to the random, branded, and hash strategies.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Upper bound on a single bulk generation batch.
pub const MAX_BULK_SIZE: usize = 100;

/// Namespaced key for the sequential strategy's counter.
pub const SEQUENCE_COUNTER_KEY: &str = "shortcode:counter";

/// How many alternatives to offer when a code is rejected or taken.
const SUGGESTION_COUNT: usize = 3;

const DEFAULT_PRONOUNCEABLE_LENGTH: usize = 6;
const DEFAULT_MEMORABLE_LENGTH: usize = 6;

/// Outcome of validating a code, suitable for reporting to a user.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub valid: bool,
    pub reason: Option<ValidationReason>,
    pub suggestions: Vec<String>,
}

/// Outcome of an availability check for a custom code.
#[derive(Debug, Clone)]
pub struct AvailabilityReport {
    pub available: bool,
    pub suggestions: Vec<String>,
}

/// Orchestrates candidate generation, validation, and uniqueness checking.
///
/// Attempts within one `generate` call run strictly sequentially; each attempt
/// produces a candidate, applies affixes, validates, then consults the
/// advisory uniqueness check. The first candidate passing both checks wins.
/// A candidate is never returned unvalidated.
pub struct GeneratorService<L: LinkStore, S: SequenceStore> {
    resolver: Arc<ResolverService<L>>,
    sequence: Arc<S>,
    default_length: usize,
    default_max_retries: u32,
}

impl<L: LinkStore, S: SequenceStore> GeneratorService<L, S> {
    /// Creates a generator service with the built-in defaults.
    pub fn new(resolver: Arc<ResolverService<L>>, sequence: Arc<S>) -> Self {
        Self::with_defaults(resolver, sequence, DEFAULT_CODE_LENGTH, DEFAULT_MAX_RETRIES)
    }

    /// Creates a generator service with explicit code-length and retry-budget
    /// defaults (`CODE_LENGTH` / `MAX_GENERATION_RETRIES` in
    /// [`crate::config::EngineConfig`]). Per-request values still win.
    pub fn with_defaults(
        resolver: Arc<ResolverService<L>>,
        sequence: Arc<S>,
        default_length: usize,
        default_max_retries: u32,
    ) -> Self {
        Self {
            resolver,
            sequence,
            default_length,
            default_max_retries,
        }
    }

    /// Generates a unique, validated short code.
    ///
    /// Loops up to the request's retry budget (falling back to the service's
    /// configured default, 10 out of the box). Each attempt runs
    /// the selected strategy, applies prefix/suffix, validates, and checks
    /// uniqueness. A store timeout during the uniqueness check consumes the
    /// attempt rather than aborting the call.
    ///
    /// The uniqueness check is advisory: two concurrent calls can both see a
    /// candidate as free. The durable store's unique constraint catches that
    /// race at insert time, and the insert path retries with a fresh candidate
    /// (see [`super::LinkService`]).
    ///
    /// # Errors
    ///
    /// - [`CodeError::MissingInput`] when the strategy needs an input the
    ///   request doesn't carry; reported before any attempt is made.
    /// - [`CodeError::Exhausted`] when every attempt produced an invalid or
    ///   taken candidate.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, CodeError> {
        let exclude = HashSet::new();
        self.generate_excluding(request, &exclude).await
    }

    /// Generates up to `count` codes, deduplicating within the batch.
    ///
    /// Codes already produced in this batch are rejected locally before they
    /// reach the uniqueness check, saving round-trips. `count` is capped at
    /// [`MAX_BULK_SIZE`].
    ///
    /// # Errors
    ///
    /// Fails with the first [`CodeError::Exhausted`] (or other generation
    /// error) encountered; codes generated so far are discarded.
    pub async fn bulk_generate(
        &self,
        count: usize,
        request: &GenerationRequest,
    ) -> Result<Vec<String>, CodeError> {
        let count = count.min(MAX_BULK_SIZE);

        let mut seen: HashSet<String> = HashSet::with_capacity(count);
        let mut codes = Vec::with_capacity(count);

        while codes.len() < count {
            let code = self.generate_excluding(request, &seen).await?;
            seen.insert(code.clone());
            codes.push(code);
        }

        Ok(codes)
    }

    /// Validates a code and, for blacklist/reserved rejections, offers up to
    /// three alternatives generated with safer strategies.
    pub async fn validate(&self, code: &str) -> ValidationReport {
        match validate_code(code) {
            Ok(()) => ValidationReport {
                valid: true,
                reason: None,
                suggestions: Vec::new(),
            },
            Err(reason) => {
                let suggestions = match reason {
                    ValidationReason::Blacklisted | ValidationReason::Reserved => {
                        self.suggest_alternatives().await
                    }
                    _ => Vec::new(),
                };

                ValidationReport {
                    valid: false,
                    reason: Some(reason),
                    suggestions,
                }
            }
        }
    }

    /// Checks whether a custom code can be claimed.
    ///
    /// Invalid codes are reported as unavailable. Taken codes come back with
    /// up to three generated alternatives.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::StoreUnavailable`] when the answer could not be
    /// determined; "couldn't check" is never reported as "available".
    pub async fn check_availability(&self, code: &str) -> Result<AvailabilityReport, CodeError> {
        if validate_code(code).is_err() {
            return Ok(AvailabilityReport {
                available: false,
                suggestions: self.suggest_alternatives().await,
            });
        }

        if self.resolver.is_taken(code).await? {
            return Ok(AvailabilityReport {
                available: false,
                suggestions: self.suggest_alternatives().await,
            });
        }

        Ok(AvailabilityReport {
            available: true,
            suggestions: Vec::new(),
        })
    }

    async fn generate_excluding(
        &self,
        request: &GenerationRequest,
        exclude: &HashSet<String>,
    ) -> Result<String, CodeError> {
        Self::require_inputs(request)?;

        let max_retries = request.max_retries.unwrap_or(self.default_max_retries).max(1);

        for attempt in 1..=max_retries {
            let candidate = match self.run_strategy(request).await {
                Ok(candidate) => candidate,
                Err(e) => {
                    // Counter/store hiccups consume the attempt.
                    warn!("Generation attempt {} failed to produce a candidate: {}", attempt, e);
                    continue;
                }
            };

            let candidate = Self::apply_affixes(candidate, request);

            if let Err(reason) = validate_code(&candidate) {
                debug!("Attempt {} rejected '{}': {}", attempt, candidate, reason);
                continue;
            }

            if exclude.contains(&candidate) {
                debug!("Attempt {} duplicated '{}' within batch", attempt, candidate);
                continue;
            }

            match self.resolver.is_taken(&candidate).await {
                Ok(false) => return Ok(candidate),
                Ok(true) => {
                    debug!("Attempt {} collided on '{}'", attempt, candidate);
                }
                Err(e) => {
                    warn!("Uniqueness check failed on attempt {}: {}", attempt, e);
                }
            }
        }

        Err(CodeError::Exhausted {
            attempts: max_retries,
        })
    }

    async fn run_strategy(&self, request: &GenerationRequest) -> Result<String, CodeError> {
        let code = match request.strategy {
            Strategy::Random => strategies::random_code(
                request.length.unwrap_or(self.default_length),
                request.charset.as_deref(),
            ),
            Strategy::Pronounceable => strategies::pronounceable_code(
                request.length.unwrap_or(DEFAULT_PRONOUNCEABLE_LENGTH),
            ),
            Strategy::Branded => {
                // Presence checked up front in require_inputs.
                let prefix = request.prefix.as_deref().unwrap_or_default();
                strategies::branded_code(prefix, request.length.unwrap_or(self.default_length))
            }
            Strategy::Memorable => {
                strategies::memorable_code(request.length.unwrap_or(DEFAULT_MEMORABLE_LENGTH))
            }
            Strategy::Sequential => {
                let value = self.sequence.increment_and_get(SEQUENCE_COUNTER_KEY).await?;
                strategies::sequential_code(value)
            }
            Strategy::HashBased => {
                let source = request.hash_source.as_deref().unwrap_or_default();
                strategies::hash_based_code(
                    source,
                    request.length.unwrap_or(self.default_length),
                )
            }
            Strategy::CustomPattern => {
                strategies::pattern_code(request.pattern.as_deref().unwrap_or_default())
            }
        };

        Ok(code)
    }

    /// Misconfigured requests fail the same way on every attempt, so they are
    /// rejected before the retry loop starts.
    fn require_inputs(request: &GenerationRequest) -> Result<(), CodeError> {
        match request.strategy {
            Strategy::Branded if request.prefix.as_deref().unwrap_or("").is_empty() => {
                Err(CodeError::MissingInput("prefix"))
            }
            Strategy::HashBased if request.hash_source.as_deref().unwrap_or("").is_empty() => {
                Err(CodeError::MissingInput("hash_source"))
            }
            Strategy::CustomPattern if request.pattern.as_deref().unwrap_or("").is_empty() => {
                Err(CodeError::MissingInput("pattern"))
            }
            _ => Ok(()),
        }
    }

    /// Branded consumes the prefix as the brand itself; concatenating it again
    /// here would double it.
    fn apply_affixes(candidate: String, request: &GenerationRequest) -> String {
        let prefix = match request.strategy {
            Strategy::Branded => "",
            _ => request.prefix.as_deref().unwrap_or(""),
        };
        let suffix = request.suffix.as_deref().unwrap_or("");

        if prefix.is_empty() && suffix.is_empty() {
            return candidate;
        }

        format!("{}{}{}", prefix, candidate, suffix)
    }

    /// Generates up to three alternatives with strategies unlikely to trip the
    /// blacklist or reserved list. Failures are swallowed: suggestions are a
    /// courtesy, never a reason to fail the triggering call.
    async fn suggest_alternatives(&self) -> Vec<String> {
        let strategies = [Strategy::Memorable, Strategy::Pronounceable, Strategy::Random];

        let mut suggestions = Vec::with_capacity(SUGGESTION_COUNT);
        for strategy in strategies {
            if suggestions.len() >= SUGGESTION_COUNT {
                break;
            }

            let request = GenerationRequest::with_strategy(strategy);
            match self.generate(&request).await {
                Ok(code) if !suggestions.contains(&code) => suggestions.push(code),
                Ok(_) => {}
                Err(e) => debug!("Suggestion generation with {:?} failed: {}", strategy, e),
            }
        }

        suggestions
    }
}
