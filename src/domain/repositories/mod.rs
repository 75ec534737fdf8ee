//! Collaborator trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure`. Mock implementations are auto-generated via
//! `mockall` for testing.

pub mod link_store;
pub mod sequence_store;

pub use link_store::LinkStore;
pub use sequence_store::SequenceStore;

#[cfg(test)]
pub use link_store::MockLinkStore;
#[cfg(test)]
pub use sequence_store::MockSequenceStore;
