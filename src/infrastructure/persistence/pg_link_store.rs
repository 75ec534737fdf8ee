//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{LinkSnapshot, LinkStatus, NewLink};
use crate::domain::repositories::LinkStore;
use crate::error::CodeError;

/// PostgreSQL store for link records.
///
/// The `links` table carries a unique index on `code` (over non-deleted rows);
/// that index, not the application-level check, is the final arbiter of
/// collisions. Queries are bound at runtime so the crate builds without a live
/// database.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    long_url: String,
    status: String,
    permanent: bool,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for LinkSnapshot {
    fn from(row: LinkRow) -> Self {
        let status = match row.status.as_str() {
            "disabled" => LinkStatus::Disabled,
            _ => LinkStatus::Active,
        };
        LinkSnapshot::new(
            row.id,
            row.code,
            row.long_url,
            status,
            row.permanent,
            row.created_at,
            row.expires_at,
        )
    }
}

const SNAPSHOT_COLUMNS: &str = "id, code, long_url, status, permanent, created_at, expires_at";

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn insert(&self, new_link: NewLink) -> Result<LinkSnapshot, CodeError> {
        let row: LinkRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO links (code, long_url, permanent, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            SNAPSHOT_COLUMNS
        ))
        .bind(&new_link.code)
        .bind(&new_link.long_url)
        .bind(new_link.permanent)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkSnapshot>, CodeError> {
        let row: Option<LinkRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}
            FROM links
            WHERE code = $1 AND deleted_at IS NULL
            "#,
            SNAPSHOT_COLUMNS
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn rename_code(
        &self,
        old_code: &str,
        new_code: &str,
    ) -> Result<Option<LinkSnapshot>, CodeError> {
        let row: Option<LinkRow> = sqlx::query_as(&format!(
            r#"
            UPDATE links
            SET code = $2, updated_at = NOW()
            WHERE code = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            SNAPSHOT_COLUMNS
        ))
        .bind(old_code)
        .bind(new_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn soft_delete(&self, code: &str) -> Result<bool, CodeError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET deleted_at = NOW()
            WHERE code = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
