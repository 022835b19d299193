//! Accept a response: the one operation whose correctness depends on more
//! than field validation.
//!
//! The Pending -> Accepted transition and the ledger insert run in a single
//! transaction. The transition is a conditional UPDATE (`... AND status = 0`),
//! so two near-simultaneous accepts cannot both observe Pending: the loser
//! matches zero rows and gets a Conflict without mutating anything. The
//! UNIQUE constraint on `accepted_matches.response_id` is the second line of
//! defense; if it ever fires, the loser's whole transaction aborts.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use crate::common::{ActingUser, AppError, ResponseId};
use crate::domains::matching::models::AcceptedMatch;
use crate::domains::needs::models::Need;
use crate::domains::responses::models::Response;

use super::{is_unique_violation, load_owned_response, with_transient_retries};

pub async fn accept_response(
    acting_user: ActingUser,
    response_id: ResponseId,
    pool: &PgPool,
) -> Result<AcceptedMatch, AppError> {
    // Preconditions, checked without mutation.
    load_owned_response(acting_user, response_id, pool).await?;

    let outcome =
        with_transient_retries("accept_response", || try_accept(response_id, pool)).await;

    match outcome {
        Ok(Some(match_record)) => {
            info!(
                response_id = %response_id,
                match_id = %match_record.id,
                need_id = %match_record.need_id,
                "response accepted"
            );
            Ok(match_record)
        }
        Ok(None) => Err(AppError::Conflict("response already processed".into())),
        Err(AppError::Database(err)) if is_unique_violation(&err) => {
            Err(AppError::Conflict("response already processed".into()))
        }
        Err(err) => Err(err),
    }
}

/// One accept attempt. Returns `None` when the response was no longer
/// Pending (nothing mutated; the open transaction rolls back on drop).
async fn try_accept(
    response_id: ResponseId,
    pool: &PgPool,
) -> Result<Option<AcceptedMatch>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(response) = Response::mark_accepted(response_id, &mut tx).await? else {
        return Ok(None);
    };

    // Snapshot the need inside the same transaction so the ledger row is
    // consistent with the accept even if the need is edited concurrently.
    let need = Need::find_in_tx(response.need_id, &mut tx)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    let match_record =
        AcceptedMatch::insert_in_tx(&need, &response, Utc::now().date_naive(), &mut tx).await?;

    tx.commit().await?;
    Ok(Some(match_record))
}
