//! Publish a new need.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{ActingUser, AppError, RegionId};
use crate::domains::needs::models::{Need, ServiceType};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNeed {
    pub region_id: Option<RegionId>,
    pub service_type: ServiceType,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
}

/// Create a need owned by the acting user. Needs always start Published.
pub async fn create_need(
    acting_user: ActingUser,
    input: CreateNeed,
    pool: &PgPool,
) -> Result<Need, AppError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title must not be empty".into()));
    }
    if input.description.trim().is_empty() {
        return Err(AppError::Validation("description must not be empty".into()));
    }

    let need = Need::create(
        acting_user.id,
        input.region_id,
        input.service_type,
        title,
        input.description.trim(),
        input.images,
        input.videos,
        pool,
    )
    .await?;

    info!(need_id = %need.id, owner_id = %need.owner_id, "need published");
    Ok(need)
}
