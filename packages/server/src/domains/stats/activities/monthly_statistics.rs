//! Monthly time series over need creation and the match ledger.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AppError, RegionId};
use crate::domains::needs::models::ServiceType;
use crate::domains::stats::models::monthly_counts::{
    matches_accepted_by_month, needs_published_by_month,
};
use crate::domains::stats::models::Month;

/// Default window when no bounds are given: the trailing six months ending
/// at the current month.
const DEFAULT_WINDOW_MONTHS: u32 = 6;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlyStatsParams {
    /// `YYYY-MM` (or bare `YYYYMM`), inclusive.
    pub start_month: Option<String>,
    /// `YYYY-MM` (or bare `YYYYMM`), inclusive.
    pub end_month: Option<String>,
    pub region_id: Option<RegionId>,
    pub service_type: Option<ServiceType>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthlySummary {
    pub total_needs: i64,
    pub total_accepted: i64,
}

/// The chart payload: one entry per month in range, zero-filled. The three
/// vectors always have equal length.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyStatistics {
    pub labels: Vec<String>,
    pub needs_published: Vec<i64>,
    pub matches_accepted: Vec<i64>,
    pub summary: MonthlySummary,
}

pub async fn monthly_statistics(
    params: MonthlyStatsParams,
    pool: &PgPool,
) -> Result<MonthlyStatistics, AppError> {
    let end = match &params.end_month {
        Some(s) => Month::parse(s)?,
        None => Month::current(),
    };
    let start = match &params.start_month {
        Some(s) => Month::parse(s)?,
        None => end.minus_months(DEFAULT_WINDOW_MONTHS - 1),
    };
    if start > end {
        return Err(AppError::Validation(
            "start_month must not be after end_month".into(),
        ));
    }

    let months = Month::expand(start, end);
    let range_end = end.next();
    let service_type = params.service_type.map(|s| s.to_string());

    let needs_rows = needs_published_by_month(
        start.start_datetime(),
        range_end.start_datetime(),
        params.region_id,
        service_type.as_deref(),
        pool,
    )
    .await?;
    let match_rows = matches_accepted_by_month(
        start.first_day(),
        range_end.first_day(),
        params.region_id,
        service_type.as_deref(),
        pool,
    )
    .await?;

    let needs_by_month: HashMap<String, i64> =
        needs_rows.into_iter().map(|r| (r.month, r.count)).collect();
    let matches_by_month: HashMap<String, i64> =
        match_rows.into_iter().map(|r| (r.month, r.count)).collect();

    // Every month in range gets a bucket, zero when empty.
    let labels: Vec<String> = months.iter().map(Month::label).collect();
    let needs_published: Vec<i64> = labels
        .iter()
        .map(|l| needs_by_month.get(l).copied().unwrap_or(0))
        .collect();
    let matches_accepted: Vec<i64> = labels
        .iter()
        .map(|l| matches_by_month.get(l).copied().unwrap_or(0))
        .collect();

    let summary = MonthlySummary {
        total_needs: needs_published.iter().sum(),
        total_accepted: matches_accepted.iter().sum(),
    };

    Ok(MonthlyStatistics {
        labels,
        needs_published,
        matches_accepted,
        summary,
    })
}
