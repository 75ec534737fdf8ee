//! Core domain entities.

pub mod generation;
pub mod link;

pub use generation::{GenerationRequest, Strategy};
pub use link::{LinkSnapshot, LinkStatus, NewLink};
