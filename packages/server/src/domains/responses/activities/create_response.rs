//! Submit a response to a need.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{ActingUser, AppError, NeedId};
use crate::domains::needs::models::{Need, NeedStatus};
use crate::domains::responses::models::Response;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateResponse {
    pub need_id: NeedId,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
}

/// Create a response owned by the acting user.
///
/// Fails with Validation when the need is not Published, when the responder
/// is the need's own publisher, or (when `reject_duplicates` is configured)
/// when the responder already has a Pending/Accepted response on the need.
pub async fn create_response(
    acting_user: ActingUser,
    input: CreateResponse,
    reject_duplicates: bool,
    pool: &PgPool,
) -> Result<Response, AppError> {
    if input.description.trim().is_empty() {
        return Err(AppError::Validation("description must not be empty".into()));
    }

    let need = Need::find_by_id(input.need_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("need {} not found", input.need_id)))?;

    if need.status != NeedStatus::Published {
        return Err(AppError::Validation(
            "cannot respond to a need that is not published".into(),
        ));
    }
    if need.owner_id == acting_user.id {
        return Err(AppError::Validation(
            "cannot respond to your own need".into(),
        ));
    }
    if reject_duplicates
        && Response::exists_active_for(need.id, acting_user.id, pool).await?
    {
        return Err(AppError::Validation(
            "you already have an open response on this need".into(),
        ));
    }

    let response = Response::create(
        need.id,
        acting_user.id,
        input.description.trim(),
        input.images,
        input.videos,
        pool,
    )
    .await?;

    info!(
        response_id = %response.id,
        need_id = %response.need_id,
        responder_id = %response.responder_id,
        "response submitted"
    );
    Ok(response)
}
