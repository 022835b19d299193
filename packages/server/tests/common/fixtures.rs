//! Test fixtures for creating test data.
//!
//! These fixtures go through the activity layer so they exercise the same
//! code paths as production callers. Every fixture user gets a fresh ID,
//! which keeps parallel tests from seeing each other's rows.

use anyhow::Result;
use helplink_core::common::{ActingUser, RegionId, Role, UserId};
use helplink_core::domains::needs::activities::{create_need, CreateNeed};
use helplink_core::domains::needs::models::{Need, ServiceType};
use helplink_core::domains::responses::activities::{create_response, CreateResponse};
use helplink_core::domains::responses::models::Response;
use sqlx::PgPool;

pub fn normal_user() -> ActingUser {
    ActingUser::new(UserId::new(), Role::Normal)
}

pub fn admin_user() -> ActingUser {
    ActingUser::new(UserId::new(), Role::Admin)
}

/// Publish a test need in a given region (pass a fresh RegionId to isolate
/// stats assertions).
pub async fn create_test_need(
    pool: &PgPool,
    owner: ActingUser,
    region_id: Option<RegionId>,
    title: &str,
) -> Result<Need> {
    let need = create_need(
        owner,
        CreateNeed {
            region_id,
            service_type: ServiceType::Cleaning,
            title: title.to_string(),
            description: "Test description".to_string(),
            images: vec![],
            videos: vec![],
        },
        pool,
    )
    .await?;
    Ok(need)
}

/// Submit a test response from `responder` on an existing need.
pub async fn create_test_response(
    pool: &PgPool,
    need: &Need,
    responder: ActingUser,
) -> Result<Response> {
    let response = create_response(
        responder,
        CreateResponse {
            need_id: need.id,
            description: "I can help with this".to_string(),
            images: vec![],
            videos: vec![],
        },
        false,
        pool,
    )
    .await?;
    Ok(response)
}
