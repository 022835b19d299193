//! Response Registry endpoints.

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::common::{ActingUser, AppError, NeedId, Page, PageParams, ResponseId};
use crate::domains::responses::activities::{
    create_response, get_response, list_my_responses, list_responses_for_need, update_response,
    withdraw_response, CreateResponse, UpdateResponse,
};
use crate::domains::responses::models::{Response, ResponseStatus};
use crate::server::app::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MyResponsesQuery {
    /// Wire encoding: 0 = Pending, 1 = Accepted, 2 = Rejected, 3 = Withdrawn.
    pub status: Option<i16>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub async fn create_response_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Json(input): Json<CreateResponse>,
) -> Result<(StatusCode, Json<Response>), AppError> {
    let response = create_response(
        acting_user,
        input,
        state.config.reject_duplicate_responses,
        &state.db_pool,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_response_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Path(response_id): Path<ResponseId>,
) -> Result<Json<Response>, AppError> {
    let response = get_response(acting_user, response_id, &state.db_pool).await?;
    Ok(Json(response))
}

pub async fn update_response_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Path(response_id): Path<ResponseId>,
    Json(input): Json<UpdateResponse>,
) -> Result<Json<Response>, AppError> {
    let response = update_response(acting_user, response_id, input, &state.db_pool).await?;
    Ok(Json(response))
}

pub async fn withdraw_response_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Path(response_id): Path<ResponseId>,
) -> Result<StatusCode, AppError> {
    withdraw_response(acting_user, response_id, &state.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Responses on one need, visible to the need's owner.
pub async fn list_need_responses_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Path(need_id): Path<NeedId>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Response>>, AppError> {
    let page = list_responses_for_need(acting_user, need_id, params, &state.db_pool).await?;
    Ok(Json(page))
}

pub async fn list_my_responses_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Query(query): Query<MyResponsesQuery>,
) -> Result<Json<Page<Response>>, AppError> {
    let status = query
        .status
        .map(ResponseStatus::try_from)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let params = PageParams {
        page: query.page,
        page_size: query.page_size,
    };

    let page = list_my_responses(acting_user, status, params, &state.db_pool).await?;
    Ok(Json(page))
}
