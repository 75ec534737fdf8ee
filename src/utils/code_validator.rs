//! Short code validation.
//!
//! Pure checks only: length, charset, blacklist, reserved words. Suggestion
//! generation for rejected codes lives in the generator service, which owns
//! the strategies needed to produce alternatives.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Minimum accepted code length.
pub const MIN_CODE_LENGTH: usize = 3;

/// Maximum accepted code length.
pub const MAX_CODE_LENGTH: usize = 50;

static CODE_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("charset regex is valid"));

/// Codes reserved for system routes; matched case-insensitively and exactly.
const RESERVED_CODES: &[&str] = &[
    "api", "admin", "login", "logout", "register", "signup", "auth", "stats", "health", "status",
    "dashboard", "domains", "settings", "static", "assets", "docs", "help", "about", "terms",
    "privacy", "pricing", "app", "www",
];

/// Terms rejected anywhere inside a code, case-insensitively.
const BLOCKED_TERMS: &[&str] = &[
    "fuck", "shit", "cunt", "bitch", "dick", "piss", "slut", "whore", "nazi", "rape", "porn",
];

/// Why a candidate code was rejected.
///
/// Variants are ordered by check priority; the first failing check wins and
/// later checks are not evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// Length outside `[MIN_CODE_LENGTH, MAX_CODE_LENGTH]`.
    BadLength,
    /// Characters outside `[A-Za-z0-9_-]`.
    BadCharset,
    /// Contains a blacklisted term as a substring.
    Blacklisted,
    /// Exactly matches a reserved system route.
    Reserved,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BadLength => write!(
                f,
                "Code must be {}-{} characters",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH
            ),
            Self::BadCharset => write!(
                f,
                "Code can only contain letters, digits, hyphens, and underscores"
            ),
            Self::Blacklisted => write!(f, "Code contains a blocked term"),
            Self::Reserved => write!(f, "Reserved word"),
        }
    }
}

/// Validates a short code against length, charset, blacklist, and reserved
/// word rules, in that order.
///
/// # Examples
///
/// ```
/// use shortcode_engine::utils::code_validator::{validate_code, ValidationReason};
///
/// assert!(validate_code("my-link-2024").is_ok());
/// assert_eq!(validate_code("admin"), Err(ValidationReason::Reserved));
/// assert_eq!(validate_code("ab"), Err(ValidationReason::BadLength));
/// ```
pub fn validate_code(code: &str) -> Result<(), ValidationReason> {
    if code.len() < MIN_CODE_LENGTH || code.len() > MAX_CODE_LENGTH {
        return Err(ValidationReason::BadLength);
    }

    if !CODE_CHARSET.is_match(code) {
        return Err(ValidationReason::BadCharset);
    }

    let lowered = code.to_ascii_lowercase();

    if BLOCKED_TERMS.iter().any(|term| lowered.contains(term)) {
        return Err(ValidationReason::Blacklisted);
    }

    if RESERVED_CODES.contains(&lowered.as_str()) {
        return Err(ValidationReason::Reserved);
    }

    Ok(())
}
