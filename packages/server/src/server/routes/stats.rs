//! Statistics endpoints (read-only).

use axum::extract::{Extension, Query};
use axum::Json;

use crate::common::{ActingUser, AppError};
use crate::domains::stats::activities::{
    monthly_statistics, platform_overview, MonthlyStatistics, MonthlyStatsParams, Overview,
};
use crate::server::app::AppState;

pub async fn monthly_statistics_handler(
    Extension(state): Extension<AppState>,
    _acting_user: ActingUser,
    Query(params): Query<MonthlyStatsParams>,
) -> Result<Json<MonthlyStatistics>, AppError> {
    let stats = monthly_statistics(params, &state.db_pool).await?;
    Ok(Json(stats))
}

pub async fn overview_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
) -> Result<Json<Overview>, AppError> {
    let overview = platform_overview(acting_user, &state.db_pool).await?;
    Ok(Json(overview))
}
