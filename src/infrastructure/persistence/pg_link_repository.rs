//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{InsertOutcome, Link, NewLink};
use crate::domain::repositories::{LinkRepository, LinkTotals};
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

/// Upper bound on insert attempts when a conflicting row vanishes mid-upsert.
const MAX_UPSERT_ATTEMPTS: usize = 3;

/// Row shape shared by every query returning a full link.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    target_url: String,
    clicks: i64,
    created_at: DateTime<Utc>,
    last_clicked: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.id,
            row.code,
            row.target_url,
            row.clicks,
            row.created_at,
            row.last_clicked,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness of `code` is enforced by a table constraint and uniqueness of
/// `target_url` by a unique index on `md5(target_url)`, which keeps URLs of
/// any length insertable. Click tracking is a single `UPDATE ... RETURNING`
/// statement, so concurrent redirects never lose increments.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create_or_get(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        for _ in 0..MAX_UPSERT_ATTEMPTS {
            let inserted = sqlx::query_as::<_, LinkRow>(
                r#"
            INSERT INTO links (code, target_url)
            VALUES ($1, $2)
            ON CONFLICT ((md5(target_url))) DO NOTHING
            RETURNING id, code, target_url, clicks, created_at, last_clicked
            "#,
            )
            .bind(&new_link.code)
            .bind(&new_link.target_url)
            .fetch_optional(self.pool.as_ref())
            .await;

            match inserted {
                Ok(Some(row)) => return Ok(InsertOutcome::Created(row.into())),
                Ok(None) => {
                    // The target URL is taken. The row may be deleted before we
                    // read it back, in which case the insert is retried.
                    if let Some(existing) = self.find_by_target_url(&new_link.target_url).await? {
                        return Ok(InsertOutcome::Existing(existing));
                    }
                }
                Err(e) if is_unique_violation_on_code(&e) => return Ok(InsertOutcome::CodeTaken),
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::store_unavailable(
            "Failed to create link",
            json!({ "reason": "Concurrent modification of target URL" }),
        ))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, target_url, clicks, created_at, last_clicked
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_target_url(&self, target_url: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, target_url, clicks, created_at, last_clicked
            FROM links
            WHERE md5(target_url) = md5($1) AND target_url = $1
            "#,
        )
        .bind(target_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
        SELECT id, code, target_url, clicks, created_at, last_clicked
        FROM links
        ORDER BY created_at DESC, id DESC
        "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_and_touch(&self, code: &str) -> Result<Option<Link>, AppError> {
        // GREATEST ignores NULL, so the first click simply takes now().
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET clicks = clicks + 1,
                last_clicked = GREATEST(last_clicked, now())
            WHERE code = $1
            RETURNING id, code, target_url, clicks, created_at, last_clicked
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn totals(&self) -> Result<LinkTotals, AppError> {
        let (links, clicks): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*)::bigint, COALESCE(SUM(clicks), 0)::bigint FROM links",
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(LinkTotals { links, clicks })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
