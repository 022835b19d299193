//! Need listings and lookups.

use sqlx::PgPool;

use crate::common::{ActingUser, AppError, NeedId, Page, PageParams};
use crate::domains::needs::models::{Need, NeedFilter, NeedStatus};

/// Public listing, newest first. Defaults to Published needs unless the
/// filter asks for a specific status.
pub async fn list_needs(
    mut filter: NeedFilter,
    params: PageParams,
    pool: &PgPool,
) -> Result<Page<Need>, AppError> {
    if filter.status.is_none() {
        filter.status = Some(NeedStatus::Published);
    }

    let results = Need::list(&filter, params.limit(), params.offset(), pool).await?;
    let total = Need::count(&filter, pool).await?;
    Ok(Page::new(results, total, &params))
}

/// Every need owned by the acting user, regardless of status.
pub async fn list_my_needs(
    acting_user: ActingUser,
    params: PageParams,
    pool: &PgPool,
) -> Result<Page<Need>, AppError> {
    let results =
        Need::list_by_owner(acting_user.id, params.limit(), params.offset(), pool).await?;
    let total = Need::count_by_owner(acting_user.id, pool).await?;
    Ok(Page::new(results, total, &params))
}

pub async fn get_need(need_id: NeedId, pool: &PgPool) -> Result<Need, AppError> {
    Need::find_by_id(need_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("need {need_id} not found")))
}
