mod accept_response;
mod reject_response;

pub use accept_response::accept_response;
pub use reject_response::reject_response;

use crate::common::error::is_transient;
use crate::common::{ActingUser, AppError, ResponseId};
use crate::domains::needs::models::Need;
use crate::domains::responses::models::Response;
use sqlx::PgPool;
use std::future::Future;
use tracing::warn;

/// Retry budget for transient serialization/lock failures before the error
/// is escalated to a Conflict.
const MAX_TRANSIENT_RETRIES: u32 = 3;

/// Precondition reads shared by accept and reject. No mutation happens here:
/// the response must exist and the caller must own the parent need.
pub(crate) async fn load_owned_response(
    acting_user: ActingUser,
    response_id: ResponseId,
    pool: &PgPool,
) -> Result<(Response, Need), AppError> {
    let response = Response::find_by_id(response_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("response {response_id} not found")))?;

    let need = Need::find_by_id(response.need_id, pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("need {} not found", response.need_id)))?;

    if need.owner_id != acting_user.id {
        return Err(AppError::Permission(
            "only the need's owner may decide this response".into(),
        ));
    }

    Ok((response, need))
}

/// Run `op` with a bounded number of retries on transient storage failures
/// (SQLSTATE 40001/40P01). Exhausted retries escalate to Conflict: the
/// caller must re-fetch state rather than blindly retry.
pub(crate) async fn with_transient_retries<T, F, Fut>(
    op_name: &'static str,
    mut op: F,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Err(err) if is_transient(&err) => {
                attempt += 1;
                if attempt > MAX_TRANSIENT_RETRIES {
                    warn!(error = %err, op = op_name, "transient retries exhausted");
                    return Err(AppError::Conflict(
                        "storage contention, please re-fetch and retry".into(),
                    ));
                }
                warn!(error = %err, op = op_name, attempt, "transient storage failure, retrying");
            }
            Err(err) => return Err(err.into()),
            Ok(value) => return Ok(value),
        }
    }
}

/// Postgres unique_violation; the accept ledger insert surfaces this when a
/// racing transaction already matched the response.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}
