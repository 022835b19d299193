//! Aggregate queries behind the statistics endpoints. Read-only: nothing in
//! this module mutates the ledger or the registries.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::common::RegionId;
use crate::domains::responses::models::ResponseStatus;

/// One month bucket of an aggregate, keyed by its `YYYY-MM` label.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

/// Published needs created per month inside `[range_start, range_end)`,
/// after the optional region/service-type filters.
pub async fn needs_published_by_month(
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    region_id: Option<RegionId>,
    service_type: Option<&str>,
    pool: &PgPool,
) -> Result<Vec<MonthlyCount>, sqlx::Error> {
    sqlx::query_as::<_, MonthlyCount>(
        r#"
        SELECT to_char(date_trunc('month', created_at AT TIME ZONE 'UTC'), 'YYYY-MM') AS month,
               COUNT(*) AS count
        FROM needs
        WHERE status = 0
          AND created_at >= $1 AND created_at < $2
          AND ($3::uuid IS NULL OR region_id = $3)
          AND ($4::text IS NULL OR service_type = $4)
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .bind(range_start)
    .bind(range_end)
    .bind(region_id)
    .bind(service_type)
    .fetch_all(pool)
    .await
}

/// Accepted matches per month inside `[range_start, range_end)`. Filters
/// apply to the ledger's snapshot columns, not the live need.
pub async fn matches_accepted_by_month(
    range_start: NaiveDate,
    range_end: NaiveDate,
    region_id: Option<RegionId>,
    service_type: Option<&str>,
    pool: &PgPool,
) -> Result<Vec<MonthlyCount>, sqlx::Error> {
    sqlx::query_as::<_, MonthlyCount>(
        r#"
        SELECT to_char(date_trunc('month', accepted_date), 'YYYY-MM') AS month,
               COUNT(*) AS count
        FROM accepted_matches
        WHERE accepted_date >= $1 AND accepted_date < $2
          AND ($3::uuid IS NULL OR region_id = $3)
          AND ($4::text IS NULL OR service_type = $4)
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .bind(range_start)
    .bind(range_end)
    .bind(region_id)
    .bind(service_type)
    .fetch_all(pool)
    .await
}

/// Responses currently in a given status, for the platform overview.
pub async fn count_responses_with_status(
    status: ResponseStatus,
    pool: &PgPool,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM responses WHERE status = $1")
        .bind(i16::from(status))
        .fetch_one(pool)
        .await
}
