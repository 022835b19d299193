//! Reject a response: same preconditions and conditional-update discipline
//! as accept, no ledger entry. A concurrent accept/reject race on the same
//! response resolves so that exactly one terminal transition wins.

use sqlx::PgPool;
use tracing::info;

use crate::common::{ActingUser, AppError, ResponseId};
use crate::domains::responses::models::Response;

use super::{load_owned_response, with_transient_retries};

pub async fn reject_response(
    acting_user: ActingUser,
    response_id: ResponseId,
    pool: &PgPool,
) -> Result<Response, AppError> {
    // Preconditions, checked without mutation.
    load_owned_response(acting_user, response_id, pool).await?;

    let rejected = with_transient_retries("reject_response", || {
        Response::mark_rejected_if_pending(response_id, pool)
    })
    .await?;

    match rejected {
        Some(response) => {
            info!(response_id = %response.id, need_id = %response.need_id, "response rejected");
            Ok(response)
        }
        None => Err(AppError::Conflict("response already processed".into())),
    }
}
