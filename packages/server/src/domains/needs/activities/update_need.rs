//! Owner-gated need edits.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{ActingUser, AppError, NeedId, RegionId};
use crate::domains::needs::models::{Need, NeedStatus, ServiceType};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNeed {
    pub region_id: Option<RegionId>,
    pub service_type: Option<ServiceType>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
}

/// Edit a need. Only the owner may edit, and only while the need is still
/// Published with no responses. The mutability guard runs as a conditional
/// UPDATE; when it matches nothing the failure is classified afterwards.
pub async fn update_need(
    acting_user: ActingUser,
    need_id: NeedId,
    input: UpdateNeed,
    pool: &PgPool,
) -> Result<Need, AppError> {
    let need = Need::find_by_id(need_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("need {need_id} not found")))?;

    if need.owner_id != acting_user.id {
        return Err(AppError::Permission(
            "only the owner may edit this need".into(),
        ));
    }

    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".into()));
        }
    }

    let updated = Need::update_content_if_unresponded(
        need_id,
        input.region_id,
        input.service_type,
        input.title.as_deref().map(str::trim),
        input.description.as_deref().map(str::trim),
        input.images,
        input.videos,
        pool,
    )
    .await?;

    match updated {
        Some(need) => {
            info!(need_id = %need.id, "need updated");
            Ok(need)
        }
        None if need.status != NeedStatus::Published => {
            Err(AppError::Conflict("need is cancelled".into()))
        }
        None => Err(AppError::Conflict(
            "need already has responses and can no longer be edited".into(),
        )),
    }
}
