//! Business logic services.

pub mod generator_service;
pub mod link_service;
pub mod resolver_service;

pub use generator_service::{AvailabilityReport, GeneratorService, ValidationReport};
pub use link_service::{CreateLink, LinkService};
pub use resolver_service::ResolverService;
