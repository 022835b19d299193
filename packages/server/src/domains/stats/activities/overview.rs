//! Platform overview counters (admin only).

use serde::Serialize;
use sqlx::PgPool;

use crate::common::{ActingUser, AppError};
use crate::domains::matching::models::AcceptedMatch;
use crate::domains::needs::models::{Need, NeedFilter, NeedStatus};
use crate::domains::responses::models::ResponseStatus;
use crate::domains::stats::models::monthly_counts::count_responses_with_status;

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_needs: i64,
    pub total_matches: i64,
    pub total_pending_responses: i64,
}

pub async fn platform_overview(
    acting_user: ActingUser,
    pool: &PgPool,
) -> Result<Overview, AppError> {
    acting_user.require_admin()?;

    let published = NeedFilter {
        status: Some(NeedStatus::Published),
        ..NeedFilter::default()
    };

    Ok(Overview {
        total_needs: Need::count(&published, pool).await?,
        total_matches: AcceptedMatch::count(pool).await?,
        total_pending_responses: count_responses_with_status(ResponseStatus::Pending, pool)
            .await?,
    })
}
