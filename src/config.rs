//! Engine configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup by the consuming service and
//! handed to the engine's constructors.
//!
//! ## Required Variables
//!
//! - `DATABASE_URL` - PostgreSQL connection string for the durable link store
//!
//! ## Optional Variables
//!
//! - `REDIS_URL` - Cache tier and sequence counter connection; when unset the
//!   engine runs cache-less (every read hits the durable store)
//! - `CACHE_TTL_SECONDS` - Positive entry TTL (default: 300)
//! - `NEGATIVE_CACHE_TTL_SECONDS` - Negative entry TTL (default: 60; kept
//!   shorter so a just-created code becomes visible quickly)
//! - `CODE_LENGTH` - Default generated code length (default: 7)
//! - `MAX_GENERATION_RETRIES` - Attempt budget per generate call (default: 10)
//! - `DB_MAX_CONNECTIONS` - Connection pool size (default: 10)

use anyhow::{Context, Result};
use std::env;

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub database_url: String,
    pub redis_url: Option<String>,
    /// TTL (seconds) for positive cache entries.
    pub cache_ttl_seconds: u64,
    /// TTL (seconds) for negative cache entries. Intentionally shorter than
    /// the positive TTL.
    pub negative_cache_ttl_seconds: u64,
    /// Default length for generated codes when a request doesn't specify one.
    pub code_length: usize,
    /// Default retry budget for a single generate call.
    pub max_generation_retries: u32,
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`).
    pub db_max_connections: u32,
}

impl EngineConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let redis_url = env::var("REDIS_URL").ok().filter(|v| !v.is_empty());

        let cache_ttl_seconds = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        let negative_cache_ttl_seconds = env::var("NEGATIVE_CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let code_length = env::var("CODE_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);

        let max_generation_retries = env::var("MAX_GENERATION_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            database_url,
            redis_url,
            cache_ttl_seconds,
            negative_cache_ttl_seconds,
            code_length,
            max_generation_retries,
            db_max_connections,
        })
    }
}
