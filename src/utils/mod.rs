//! Pure helpers for code generation and validation.
//!
//! - [`base62`] - Base-62 integer encoding
//! - [`code_validator`] - Length, charset, blacklist, and reserved word checks
//! - [`strategies`] - The seven candidate-producing algorithms

pub mod base62;
pub mod code_validator;
pub mod strategies;
