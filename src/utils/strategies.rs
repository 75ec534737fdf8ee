//! Candidate short code producers.
//!
//! Each function yields a raw candidate; the generator service applies
//! prefix/suffix, validates, and checks uniqueness. All strategies draw only
//! from `[A-Za-z0-9]` so that affixes are the only source of `-`/`_`.
//!
//! Sequential codes take an already-incremented counter value (the service
//! owns the [`crate::domain::repositories::SequenceStore`] round-trip) and
//! hash-based codes are a deterministic function of the source URL.

use rand::Rng;

use super::base62;

/// Full 62-symbol alphabet used by the random and `X` pattern draws.
pub const ALPHANUMERIC: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lowercase 36-symbol alphabet used for branded suffixes.
const LOWER_ALPHANUMERIC: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const CONSONANTS: &[u8] = b"bcdfghjklmnpqrstvwxz";
const VOWELS: &[u8] = b"aeiou";
const DIGITS: &[u8] = b"0123456789";
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Short, common words used by the memorable strategy.
const MEMORABLE_WORDS: &[&str] = &[
    "fox", "sky", "sun", "map", "cat", "owl", "bee", "ray", "gem", "oak", "ivy", "elk", "jet",
    "koi", "yak", "star", "moon", "wave", "leaf", "mint", "rock", "sand", "snow", "wind", "fern",
    "dawn", "dusk", "lake", "pine", "wolf",
];

/// Added to every counter value before base-62 encoding so sequential codes
/// never fall below four characters.
pub const SEQUENCE_OFFSET: u64 = 1_000_000;

/// Minimum generated suffix length for branded codes.
const BRANDED_SUFFIX_FLOOR: usize = 4;

/// Minimum numeric tail length for memorable codes.
const MEMORABLE_DIGITS_FLOOR: usize = 2;

fn pick(alphabet: &[u8]) -> char {
    let idx = rand::rng().random_range(0..alphabet.len());
    alphabet[idx] as char
}

/// Draws `length` characters uniformly from `charset`, defaulting to the full
/// 62-symbol alphanumeric alphabet.
pub fn random_code(length: usize, charset: Option<&str>) -> String {
    match charset {
        Some(set) if !set.is_empty() => {
            let symbols: Vec<char> = set.chars().collect();
            let mut rng = rand::rng();
            (0..length)
                .map(|_| symbols[rng.random_range(0..symbols.len())])
                .collect()
        }
        _ => (0..length).map(|_| pick(ALPHANUMERIC)).collect(),
    }
}

/// Alternates consonants and vowels to produce a speakable code.
pub fn pronounceable_code(length: usize) -> String {
    (0..length)
        .map(|i| {
            if i % 2 == 0 {
                pick(CONSONANTS)
            } else {
                pick(VOWELS)
            }
        })
        .collect()
}

/// Appends a random lowercase-alphanumeric suffix to a caller-supplied brand
/// prefix, sizing the suffix so the whole code approaches `total_length`.
///
/// The suffix never shrinks below four characters regardless of how long the
/// prefix already is.
pub fn branded_code(prefix: &str, total_length: usize) -> String {
    let suffix_len = total_length
        .saturating_sub(prefix.len())
        .max(BRANDED_SUFFIX_FLOOR);

    let mut code = String::with_capacity(prefix.len() + suffix_len);
    code.push_str(prefix);
    for _ in 0..suffix_len {
        code.push(pick(LOWER_ALPHANUMERIC));
    }
    code
}

/// Picks a word from the memorable list and pads it with random digits up to
/// `total_length` (at least two digits are always appended).
pub fn memorable_code(total_length: usize) -> String {
    let word = MEMORABLE_WORDS[rand::rng().random_range(0..MEMORABLE_WORDS.len())];
    let digits_len = total_length
        .saturating_sub(word.len())
        .max(MEMORABLE_DIGITS_FLOOR);

    let mut code = String::with_capacity(word.len() + digits_len);
    code.push_str(word);
    for _ in 0..digits_len {
        code.push(pick(DIGITS));
    }
    code
}

/// Base-62 encodes an already-incremented counter value, offset so the
/// resulting code is always at least four characters.
pub fn sequential_code(counter_value: u64) -> String {
    base62::encode(SEQUENCE_OFFSET + counter_value)
}

/// Deterministically derives a code from `source` via a 32-bit rolling hash,
/// truncated to `length`.
///
/// The same source always produces the same raw hash; only the truncation
/// varies with the requested length.
pub fn hash_based_code(source: &str, length: usize) -> String {
    let mut hash: i32 = 0;
    for byte in source.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(byte as i32);
    }

    let mut code = base62::encode(hash.unsigned_abs() as u64);
    code.truncate(length);
    code
}

/// Expands a template where `A` is a random letter, `N` a random digit, `X` a
/// random alphanumeric, and every other character passes through literally.
pub fn pattern_code(pattern: &str) -> String {
    pattern
        .chars()
        .map(|c| match c {
            'A' => pick(LETTERS),
            'N' => pick(DIGITS),
            'X' => pick(ALPHANUMERIC),
            other => other,
        })
        .collect()
}
