//! Need cancellation. A one-way transition; needs are never deleted, so
//! historical responses and matches keep valid references.

use sqlx::PgPool;
use tracing::info;

use crate::common::{ActingUser, AppError, NeedId};
use crate::domains::needs::models::{Need, NeedStatus};

/// Owner cancellation: requires Published status and zero responses.
pub async fn cancel_need(
    acting_user: ActingUser,
    need_id: NeedId,
    pool: &PgPool,
) -> Result<(), AppError> {
    let need = Need::find_by_id(need_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("need {need_id} not found")))?;

    if need.owner_id != acting_user.id {
        return Err(AppError::Permission(
            "only the owner may cancel this need".into(),
        ));
    }

    if Need::cancel_if_unresponded(need_id, pool).await? == 0 {
        if need.status != NeedStatus::Published {
            return Err(AppError::Conflict("need is already cancelled".into()));
        }
        return Err(AppError::Conflict(
            "need already has responses and can no longer be cancelled".into(),
        ));
    }

    info!(need_id = %need_id, "need cancelled by owner");
    Ok(())
}

/// Administrative cancellation: bypasses the response-count check but still
/// requires Published status. Existing responses are untouched.
pub async fn force_cancel_need(
    acting_user: ActingUser,
    need_id: NeedId,
    pool: &PgPool,
) -> Result<(), AppError> {
    acting_user.require_admin()?;

    Need::find_by_id(need_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("need {need_id} not found")))?;

    if Need::cancel_published(need_id, pool).await? == 0 {
        return Err(AppError::Conflict("need is already cancelled".into()));
    }

    info!(need_id = %need_id, admin_id = %acting_user.id, "need force-cancelled");
    Ok(())
}
