use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{NeedId, RegionId, UserId};

/// A published request for help.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Need {
    pub id: NeedId,
    pub owner_id: UserId,
    pub region_id: Option<RegionId>,
    pub service_type: String, // Maps to ServiceType at the API boundary
    pub title: String,
    pub description: String,
    pub images: Json<Vec<String>>,
    pub videos: Json<Vec<String>>,
    pub status: NeedStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Need lifecycle status. The integer values are the persisted wire
/// encoding and must not change; external consumers depend on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(into = "i16", try_from = "i16")]
#[repr(i16)]
pub enum NeedStatus {
    Published = 0,
    Cancelled = -1,
}

impl From<NeedStatus> for i16 {
    fn from(status: NeedStatus) -> i16 {
        status as i16
    }
}

impl TryFrom<i16> for NeedStatus {
    type Error = anyhow::Error;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NeedStatus::Published),
            -1 => Ok(NeedStatus::Cancelled),
            other => Err(anyhow::anyhow!("invalid need status: {}", other)),
        }
    }
}

/// Service category for a need. Stored as its snake_case string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    PlumbingRepair,
    ElderCare,
    Cleaning,
    MedicalEscort,
    MealService,
    Transport,
    Other,
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ServiceType::PlumbingRepair => "plumbing_repair",
            ServiceType::ElderCare => "elder_care",
            ServiceType::Cleaning => "cleaning",
            ServiceType::MedicalEscort => "medical_escort",
            ServiceType::MealService => "meal_service",
            ServiceType::Transport => "transport",
            ServiceType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ServiceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plumbing_repair" => Ok(ServiceType::PlumbingRepair),
            "elder_care" => Ok(ServiceType::ElderCare),
            "cleaning" => Ok(ServiceType::Cleaning),
            "medical_escort" => Ok(ServiceType::MedicalEscort),
            "meal_service" => Ok(ServiceType::MealService),
            "transport" => Ok(ServiceType::Transport),
            "other" => Ok(ServiceType::Other),
            _ => Err(anyhow::anyhow!("invalid service type: {}", s)),
        }
    }
}

/// Filters for the public need listing.
#[derive(Debug, Clone, Default)]
pub struct NeedFilter {
    pub service_type: Option<ServiceType>,
    pub region_id: Option<RegionId>,
    pub status: Option<NeedStatus>,
    /// Free-text match against title and description.
    pub query: Option<String>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Need {
    /// Insert a new need. Needs always start Published.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        owner_id: UserId,
        region_id: Option<RegionId>,
        service_type: ServiceType,
        title: &str,
        description: &str,
        images: Vec<String>,
        videos: Vec<String>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Need>(
            r#"
            INSERT INTO needs (id, owner_id, region_id, service_type, title, description, images, videos, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0)
            RETURNING *
            "#,
        )
        .bind(NeedId::new())
        .bind(owner_id)
        .bind(region_id)
        .bind(service_type.to_string())
        .bind(title)
        .bind(description)
        .bind(Json(images))
        .bind(Json(videos))
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(id: NeedId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Need>("SELECT * FROM needs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lookup inside the caller's transaction. The matching engine reads the
    /// need here so the ledger snapshot is consistent with the accept.
    pub async fn find_in_tx(
        id: NeedId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Need>("SELECT * FROM needs WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Filtered listing, newest first.
    pub async fn list(
        filter: &NeedFilter,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Need>(
            r#"
            SELECT * FROM needs
            WHERE ($1::text IS NULL OR service_type = $1)
              AND ($2::uuid IS NULL OR region_id = $2)
              AND ($3::smallint IS NULL OR status = $3)
              AND ($4::text IS NULL OR title ILIKE '%' || $4 || '%' OR description ILIKE '%' || $4 || '%')
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filter.service_type.map(|s| s.to_string()))
        .bind(filter.region_id)
        .bind(filter.status.map(i16::from))
        .bind(filter.query.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Total row count for the same filter (for pagination).
    pub async fn count(filter: &NeedFilter, pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM needs
            WHERE ($1::text IS NULL OR service_type = $1)
              AND ($2::uuid IS NULL OR region_id = $2)
              AND ($3::smallint IS NULL OR status = $3)
              AND ($4::text IS NULL OR title ILIKE '%' || $4 || '%' OR description ILIKE '%' || $4 || '%')
            "#,
        )
        .bind(filter.service_type.map(|s| s.to_string()))
        .bind(filter.region_id)
        .bind(filter.status.map(i16::from))
        .bind(filter.query.as_deref())
        .fetch_one(pool)
        .await
    }

    pub async fn list_by_owner(
        owner_id: UserId,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Need>(
            "SELECT * FROM needs WHERE owner_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count_by_owner(owner_id: UserId, pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM needs WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Conditional content update: only succeeds while the need is still
    /// Published with no responses. Returns `None` when the guard failed.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_content_if_unresponded(
        id: NeedId,
        region_id: Option<RegionId>,
        service_type: Option<ServiceType>,
        title: Option<&str>,
        description: Option<&str>,
        images: Option<Vec<String>>,
        videos: Option<Vec<String>>,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Need>(
            r#"
            UPDATE needs
            SET
                region_id = COALESCE($2, region_id),
                service_type = COALESCE($3, service_type),
                title = COALESCE($4, title),
                description = COALESCE($5, description),
                images = COALESCE($6, images),
                videos = COALESCE($7, videos),
                updated_at = NOW()
            WHERE id = $1
              AND status = 0
              AND NOT EXISTS (SELECT 1 FROM responses r WHERE r.need_id = needs.id)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(region_id)
        .bind(service_type.map(|s| s.to_string()))
        .bind(title)
        .bind(description)
        .bind(images.map(Json))
        .bind(videos.map(Json))
        .fetch_optional(pool)
        .await
    }

    /// Owner cancellation: Published -> Cancelled, only while the need has
    /// no responses. A single conditional UPDATE so a racing response
    /// creation cannot slip past the guard.
    pub async fn cancel_if_unresponded(id: NeedId, pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE needs
            SET status = -1, updated_at = NOW()
            WHERE id = $1
              AND status = 0
              AND NOT EXISTS (SELECT 1 FROM responses r WHERE r.need_id = needs.id)
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Administrative cancellation: bypasses the response-count check but
    /// still requires Published. Existing responses are untouched.
    pub async fn cancel_published(id: NeedId, pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE needs SET status = -1, updated_at = NOW() WHERE id = $1 AND status = 0")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
