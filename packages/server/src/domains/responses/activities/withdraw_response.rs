//! Responder withdrawal: Pending -> Withdrawn (terminal).

use sqlx::PgPool;
use tracing::info;

use crate::common::{ActingUser, AppError, ResponseId};
use crate::domains::responses::models::Response;

pub async fn withdraw_response(
    acting_user: ActingUser,
    response_id: ResponseId,
    pool: &PgPool,
) -> Result<(), AppError> {
    let response = Response::find_by_id(response_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("response {response_id} not found")))?;

    if response.responder_id != acting_user.id {
        return Err(AppError::Permission(
            "only the responder may withdraw this response".into(),
        ));
    }

    if Response::withdraw_if_pending(response_id, pool).await? == 0 {
        return Err(AppError::Conflict("response already processed".into()));
    }

    info!(response_id = %response_id, "response withdrawn");
    Ok(())
}
