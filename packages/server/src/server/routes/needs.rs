//! Need Registry endpoints.

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::common::{ActingUser, AppError, NeedId, Page, PageParams, RegionId};
use crate::domains::needs::activities::{
    cancel_need, create_need, force_cancel_need, get_need, list_my_needs, list_needs,
    update_need, CreateNeed, UpdateNeed,
};
use crate::domains::needs::models::{Need, NeedFilter, NeedStatus, ServiceType};
use crate::server::app::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListNeedsQuery {
    pub service_type: Option<ServiceType>,
    pub region_id: Option<RegionId>,
    /// Wire encoding: 0 = Published, -1 = Cancelled.
    pub status: Option<i16>,
    /// Free-text match against title and description.
    pub q: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub async fn create_need_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Json(input): Json<CreateNeed>,
) -> Result<(StatusCode, Json<Need>), AppError> {
    let need = create_need(acting_user, input, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(need)))
}

pub async fn list_needs_handler(
    Extension(state): Extension<AppState>,
    _acting_user: ActingUser,
    Query(query): Query<ListNeedsQuery>,
) -> Result<Json<Page<Need>>, AppError> {
    let status = query
        .status
        .map(NeedStatus::try_from)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let filter = NeedFilter {
        service_type: query.service_type,
        region_id: query.region_id,
        status,
        query: query.q,
    };
    let params = PageParams {
        page: query.page,
        page_size: query.page_size,
    };

    let page = list_needs(filter, params, &state.db_pool).await?;
    Ok(Json(page))
}

pub async fn get_need_handler(
    Extension(state): Extension<AppState>,
    _acting_user: ActingUser,
    Path(need_id): Path<NeedId>,
) -> Result<Json<Need>, AppError> {
    let need = get_need(need_id, &state.db_pool).await?;
    Ok(Json(need))
}

pub async fn update_need_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Path(need_id): Path<NeedId>,
    Json(input): Json<UpdateNeed>,
) -> Result<Json<Need>, AppError> {
    let need = update_need(acting_user, need_id, input, &state.db_pool).await?;
    Ok(Json(need))
}

/// Owner cancellation (soft delete: a one-way status transition).
pub async fn cancel_need_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Path(need_id): Path<NeedId>,
) -> Result<StatusCode, AppError> {
    cancel_need(acting_user, need_id, &state.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Administrative cancellation: ignores the response-count guard.
pub async fn force_cancel_need_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Path(need_id): Path<NeedId>,
) -> Result<StatusCode, AppError> {
    force_cancel_need(acting_user, need_id, &state.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_my_needs_handler(
    Extension(state): Extension<AppState>,
    acting_user: ActingUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Need>>, AppError> {
    let page = list_my_needs(acting_user, params, &state.db_pool).await?;
    Ok(Json(page))
}
