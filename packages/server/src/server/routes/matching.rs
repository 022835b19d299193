//! Matching Engine endpoints: the terminal accept/reject decisions.

use axum::extract::{Extension, Path};
use axum::Json;

use crate::common::{ActingUser, AppError, ResponseId};
use crate::domains::matching::activities::{accept_response, reject_response};
use crate::domains::matching::models::AcceptedMatch;
use crate::domains::responses::models::Response;
use crate::server::app::AppState;

pub async fn accept_response_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Path(response_id): Path<ResponseId>,
) -> Result<Json<AcceptedMatch>, AppError> {
    let match_record = accept_response(acting_user, response_id, &state.db_pool).await?;
    Ok(Json(match_record))
}

pub async fn reject_response_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Path(response_id): Path<ResponseId>,
) -> Result<Json<Response>, AppError> {
    let response = reject_response(acting_user, response_id, &state.db_pool).await?;
    Ok(Json(response))
}
