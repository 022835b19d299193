//! Response listings and lookups.

use sqlx::PgPool;

use crate::common::{ActingUser, AppError, NeedId, Page, PageParams, ResponseId};
use crate::domains::needs::models::Need;
use crate::domains::responses::models::{Response, ResponseStatus};

/// Responses on a need, visible to the need's owner only. Withdrawn
/// responses are excluded.
pub async fn list_responses_for_need(
    acting_user: ActingUser,
    need_id: NeedId,
    params: PageParams,
    pool: &PgPool,
) -> Result<Page<Response>, AppError> {
    let need = Need::find_by_id(need_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("need {need_id} not found")))?;

    if need.owner_id != acting_user.id && !acting_user.is_admin() {
        return Err(AppError::Permission(
            "only the need's owner may view its responses".into(),
        ));
    }

    let results = Response::list_for_need(need_id, params.limit(), params.offset(), pool).await?;
    let total = Response::count_for_need_visible(need_id, pool).await?;
    Ok(Page::new(results, total, &params))
}

/// Every response submitted by the acting user, optionally filtered by
/// status.
pub async fn list_my_responses(
    acting_user: ActingUser,
    status: Option<ResponseStatus>,
    params: PageParams,
    pool: &PgPool,
) -> Result<Page<Response>, AppError> {
    let results = Response::list_by_responder(
        acting_user.id,
        status,
        params.limit(),
        params.offset(),
        pool,
    )
    .await?;
    let total = Response::count_by_responder(acting_user.id, status, pool).await?;
    Ok(Page::new(results, total, &params))
}

/// Fetch one response. Visible to its responder, the need's owner, and
/// admins.
pub async fn get_response(
    acting_user: ActingUser,
    response_id: ResponseId,
    pool: &PgPool,
) -> Result<Response, AppError> {
    let response = Response::find_by_id(response_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("response {response_id} not found")))?;

    if response.responder_id == acting_user.id || acting_user.is_admin() {
        return Ok(response);
    }
    let need = Need::find_by_id(response.need_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("need {} not found", response.need_id)))?;
    if need.owner_id != acting_user.id {
        return Err(AppError::Permission(
            "not a party to this response".into(),
        ));
    }
    Ok(response)
}
