//! Durable store implementations.

mod pg_link_store;
mod redis_sequence_store;

pub use pg_link_store::PgLinkStore;
pub use redis_sequence_store::RedisSequenceStore;
