//! Base-62 integer encoding for compact, ordered short codes.

/// Digit order matters: `0-9 < a-z < A-Z` keeps encoded sequential counters
/// lexicographically comparable for equal lengths.
const BASE62_ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Encodes a non-negative integer in base 62.
///
/// Zero encodes as `"0"`. No padding is applied; callers that need a minimum
/// length offset the input value instead (see the sequential strategy).
pub fn encode(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE62_ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    digits.reverse();

    // The alphabet is ASCII, so the bytes are always valid UTF-8.
    String::from_utf8(digits).expect("base62 alphabet is ASCII")
}
