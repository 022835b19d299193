use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{MatchId, NeedId, RegionId, ResponseId, UserId};
use crate::domains::needs::models::Need;
use crate::domains::responses::models::Response;

/// One row of the append-only match ledger, created when a response is
/// accepted. Owner, responder, service type and region are snapshots of the
/// need at accept time and stay fixed even if the need is edited later.
/// Rows are immutable and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AcceptedMatch {
    pub id: MatchId,
    pub need_id: NeedId,
    pub need_owner_id: UserId,
    pub response_id: ResponseId,
    pub responder_id: UserId,
    pub accepted_date: NaiveDate,
    pub service_type: String,
    pub region_id: Option<RegionId>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl AcceptedMatch {
    /// Insert the ledger row inside the accept transaction. The UNIQUE
    /// constraint on `response_id` guarantees at most one match per response
    /// under any execution order; a violation aborts the whole transaction.
    pub async fn insert_in_tx(
        need: &Need,
        response: &Response,
        accepted_date: NaiveDate,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, AcceptedMatch>(
            r#"
            INSERT INTO accepted_matches (
                id, need_id, need_owner_id, response_id, responder_id,
                accepted_date, service_type, region_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(MatchId::new())
        .bind(need.id)
        .bind(need.owner_id)
        .bind(response.id)
        .bind(response.responder_id)
        .bind(accepted_date)
        .bind(&need.service_type)
        .bind(need.region_id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn find_by_response(
        response_id: ResponseId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, AcceptedMatch>(
            "SELECT * FROM accepted_matches WHERE response_id = $1",
        )
        .bind(response_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accepted_matches")
            .fetch_one(pool)
            .await
    }

    pub async fn count_for_need(need_id: NeedId, pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accepted_matches WHERE need_id = $1")
            .bind(need_id)
            .fetch_one(pool)
            .await
    }
}
