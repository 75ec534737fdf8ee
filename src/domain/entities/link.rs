//! Link snapshot entities used on the lookup hot path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a link as far as redirects are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Active,
    Disabled,
}

/// Serialized projection of a link: just the fields a redirect needs.
///
/// This is a copy, not the authoritative record; the durable store owns truth
/// and the cache tier owns this snapshot's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSnapshot {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub status: LinkStatus,
    /// When true the consumer issues a permanent (301) redirect.
    pub permanent: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkSnapshot {
    /// Creates a new snapshot.
    pub fn new(
        id: i64,
        code: String,
        long_url: String,
        status: LinkStatus,
        permanent: bool,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            code,
            long_url,
            status,
            permanent,
            created_at,
            expires_at,
        }
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
    pub permanent: bool,
    pub expires_at: Option<DateTime<Utc>>,
}
