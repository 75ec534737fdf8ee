//! # Shortcode Engine
//!
//! The hot path of a URL shortener: collision-free short code generation
//! under concurrent creation, and code-to-link resolution through a
//! cache-aside layer with positive and negative caching.
//!
//! This crate is a library consumed in-process by a link-management service;
//! it has no HTTP surface of its own.
//!
//! ## Architecture
//!
//! Layers follow Clean Architecture conventions:
//!
//! - **Domain Layer** ([`domain`]) - Entities and collaborator traits
//!   ([`domain::repositories::LinkStore`], [`domain::repositories::SequenceStore`])
//! - **Application Layer** ([`application`]) - Generation, resolution, and
//!   link lifecycle services
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL store, Redis
//!   cache tier and sequence counter
//! - **Utilities** ([`utils`]) - Pure validation, base-62 encoding, and the
//!   seven generation strategies
//!
//! ## Uniqueness model
//!
//! The in-cache and in-store availability checks are advisory. Two concurrent
//! creations can both observe a candidate as free; the durable store's unique
//! index on the code column is the final arbiter, and the creation path
//! retries with a fresh candidate when an insert loses that race. Do not
//! remove the constraint because the application-level check exists.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use shortcode_engine::prelude::*;
//! use shortcode_engine::infrastructure::cache::RedisCache;
//! use shortcode_engine::infrastructure::persistence::{PgLinkStore, RedisSequenceStore};
//!
//! let config = EngineConfig::from_env()?;
//! let pool = Arc::new(
//!     sqlx::postgres::PgPoolOptions::new()
//!         .max_connections(config.db_max_connections)
//!         .connect(&config.database_url)
//!         .await?,
//! );
//!
//! let store = Arc::new(PgLinkStore::new(pool));
//! let cache = Arc::new(RedisCache::connect(config.redis_url.as_deref().unwrap()).await?);
//! let sequence = Arc::new(RedisSequenceStore::connect(config.redis_url.as_deref().unwrap()).await?);
//!
//! let resolver = Arc::new(ResolverService::with_ttls(
//!     store.clone(),
//!     cache,
//!     config.cache_ttl_seconds,
//!     config.negative_cache_ttl_seconds,
//! ));
//! let generator = Arc::new(GeneratorService::with_defaults(
//!     resolver.clone(),
//!     sequence,
//!     config.code_length,
//!     config.max_generation_retries,
//! ));
//! let links = LinkService::new(store, resolver.clone(), generator);
//!
//! let link = links.create_link(CreateLink {
//!     long_url: "https://example.com".to_string(),
//!     ..Default::default()
//! }).await?;
//!
//! let snapshot = resolver.resolve(&link.code).await?;
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use config::EngineConfig;
pub use error::CodeError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AvailabilityReport, CreateLink, GeneratorService, LinkService, ResolverService,
        ValidationReport,
    };
    pub use crate::config::EngineConfig;
    pub use crate::domain::entities::{
        GenerationRequest, LinkSnapshot, LinkStatus, NewLink, Strategy,
    };
    pub use crate::domain::repositories::{LinkStore, SequenceStore};
    pub use crate::error::CodeError;
}
