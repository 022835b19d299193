//! Responder-gated response edits.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{ActingUser, AppError, ResponseId};
use crate::domains::responses::models::Response;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateResponse {
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
}

/// Edit a response's description/media. Only the responder may edit, and
/// only while the response is still Pending.
pub async fn update_response(
    acting_user: ActingUser,
    response_id: ResponseId,
    input: UpdateResponse,
    pool: &PgPool,
) -> Result<Response, AppError> {
    let response = Response::find_by_id(response_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("response {response_id} not found")))?;

    if response.responder_id != acting_user.id {
        return Err(AppError::Permission(
            "only the responder may edit this response".into(),
        ));
    }

    if let Some(description) = &input.description {
        if description.trim().is_empty() {
            return Err(AppError::Validation("description must not be empty".into()));
        }
    }

    let updated = Response::update_content_if_pending(
        response_id,
        input.description.as_deref().map(str::trim),
        input.images,
        input.videos,
        pool,
    )
    .await?;

    match updated {
        Some(response) => {
            info!(response_id = %response.id, "response updated");
            Ok(response)
        }
        None => Err(AppError::Conflict(
            "response already processed and can no longer be edited".into(),
        )),
    }
}
