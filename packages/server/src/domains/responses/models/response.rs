use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{NeedId, ResponseId, UserId};

/// An offer to fulfill a need. `need_id` and `responder_id` are immutable
/// once created.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Response {
    pub id: ResponseId,
    pub need_id: NeedId,
    pub responder_id: UserId,
    pub description: String,
    pub images: Json<Vec<String>>,
    pub videos: Json<Vec<String>>,
    pub status: ResponseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response lifecycle status. Pending is the only non-terminal state; the
/// integer values are the persisted wire encoding and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(into = "i16", try_from = "i16")]
#[repr(i16)]
pub enum ResponseStatus {
    Pending = 0,
    Accepted = 1,
    Rejected = 2,
    Withdrawn = 3,
}

impl From<ResponseStatus> for i16 {
    fn from(status: ResponseStatus) -> i16 {
        status as i16
    }
}

impl TryFrom<i16> for ResponseStatus {
    type Error = anyhow::Error;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ResponseStatus::Pending),
            1 => Ok(ResponseStatus::Accepted),
            2 => Ok(ResponseStatus::Rejected),
            3 => Ok(ResponseStatus::Withdrawn),
            other => Err(anyhow::anyhow!("invalid response status: {}", other)),
        }
    }
}

impl ResponseStatus {
    /// Accepted, Rejected and Withdrawn are all terminal.
    pub fn is_terminal(self) -> bool {
        self != ResponseStatus::Pending
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Response {
    /// Insert a new response. Responses always start Pending.
    pub async fn create(
        need_id: NeedId,
        responder_id: UserId,
        description: &str,
        images: Vec<String>,
        videos: Vec<String>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Response>(
            r#"
            INSERT INTO responses (id, need_id, responder_id, description, images, videos, status)
            VALUES ($1, $2, $3, $4, $5, $6, 0)
            RETURNING *
            "#,
        )
        .bind(ResponseId::new())
        .bind(need_id)
        .bind(responder_id)
        .bind(description)
        .bind(Json(images))
        .bind(Json(videos))
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(id: ResponseId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Response>("SELECT * FROM responses WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Responses on a need, excluding Withdrawn (status 3), newest first.
    pub async fn list_for_need(
        need_id: NeedId,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Response>(
            r#"
            SELECT * FROM responses
            WHERE need_id = $1 AND status <> 3
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(need_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count_for_need_visible(
        need_id: NeedId,
        pool: &PgPool,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM responses WHERE need_id = $1 AND status <> 3",
        )
        .bind(need_id)
        .fetch_one(pool)
        .await
    }

    pub async fn list_by_responder(
        responder_id: UserId,
        status: Option<ResponseStatus>,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Response>(
            r#"
            SELECT * FROM responses
            WHERE responder_id = $1 AND ($2::smallint IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(responder_id)
        .bind(status.map(i16::from))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count_by_responder(
        responder_id: UserId,
        status: Option<ResponseStatus>,
        pool: &PgPool,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM responses WHERE responder_id = $1 AND ($2::smallint IS NULL OR status = $2)",
        )
        .bind(responder_id)
        .bind(status.map(i16::from))
        .fetch_one(pool)
        .await
    }

    /// Whether the responder already holds a Pending or Accepted response on
    /// the need (for the optional duplicate-submission guard).
    pub async fn exists_active_for(
        need_id: NeedId,
        responder_id: UserId,
        pool: &PgPool,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM responses
                WHERE need_id = $1 AND responder_id = $2 AND status IN (0, 1)
            )
            "#,
        )
        .bind(need_id)
        .bind(responder_id)
        .fetch_one(pool)
        .await
    }

    /// Conditional content update: only while still Pending. Returns `None`
    /// when the response was already processed.
    pub async fn update_content_if_pending(
        id: ResponseId,
        description: Option<&str>,
        images: Option<Vec<String>>,
        videos: Option<Vec<String>>,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Response>(
            r#"
            UPDATE responses
            SET
                description = COALESCE($2, description),
                images = COALESCE($3, images),
                videos = COALESCE($4, videos),
                updated_at = NOW()
            WHERE id = $1 AND status = 0
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(description)
        .bind(images.map(Json))
        .bind(videos.map(Json))
        .fetch_optional(pool)
        .await
    }

    /// Pending -> Withdrawn, only if still Pending.
    pub async fn withdraw_if_pending(id: ResponseId, pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE responses SET status = 3, updated_at = NOW() WHERE id = $1 AND status = 0",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Pending -> Accepted inside the caller's transaction. The WHERE clause
    /// on status makes the read-check-write a single indivisible step; a
    /// concurrent accept or reject sees zero rows here.
    pub async fn mark_accepted(
        id: ResponseId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Response>(
            "UPDATE responses SET status = 1, updated_at = NOW() WHERE id = $1 AND status = 0 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Pending -> Rejected, only if still Pending.
    pub async fn mark_rejected_if_pending(
        id: ResponseId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Response>(
            "UPDATE responses SET status = 2, updated_at = NOW() WHERE id = $1 AND status = 0 RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
