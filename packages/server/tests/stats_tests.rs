//! Integration tests for statistics aggregation.
//!
//! Stats queries are scoped to a freshly generated region per test so that
//! parallel tests cannot disturb each other's counts.

mod common;

use crate::common::{admin_user, create_test_need, create_test_response, normal_user, TestHarness};
use helplink_core::common::{AppError, RegionId};
use helplink_core::domains::matching::activities::accept_response;
use helplink_core::domains::needs::models::ServiceType;
use helplink_core::domains::stats::activities::{
    monthly_statistics, platform_overview, MonthlyStatsParams,
};
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn empty_window_is_zero_filled(ctx: &TestHarness) {
    let params = MonthlyStatsParams {
        start_month: Some("2024-01".to_string()),
        end_month: Some("2024-03".to_string()),
        region_id: Some(RegionId::new()),
        service_type: None,
    };

    let stats = monthly_statistics(params, &ctx.db_pool).await.unwrap();

    assert_eq!(stats.labels, vec!["2024-01", "2024-02", "2024-03"]);
    assert_eq!(stats.needs_published, vec![0, 0, 0]);
    assert_eq!(stats.matches_accepted, vec![0, 0, 0]);
    assert_eq!(stats.summary.total_needs, 0);
    assert_eq!(stats.summary.total_accepted, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn window_spans_year_boundary(ctx: &TestHarness) {
    let params = MonthlyStatsParams {
        start_month: Some("2023-11".to_string()),
        end_month: Some("2024-02".to_string()),
        region_id: Some(RegionId::new()),
        service_type: None,
    };

    let stats = monthly_statistics(params, &ctx.db_pool).await.unwrap();
    assert_eq!(
        stats.labels,
        vec!["2023-11", "2023-12", "2024-01", "2024-02"]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn counts_land_in_the_current_month_bucket(ctx: &TestHarness) {
    let owner = normal_user();
    let region = RegionId::new();

    let mut needs = Vec::new();
    for i in 0..3 {
        needs.push(
            create_test_need(&ctx.db_pool, owner, Some(region), &format!("Need {i}"))
                .await
                .unwrap(),
        );
    }
    let response = create_test_response(&ctx.db_pool, &needs[0], normal_user())
        .await
        .unwrap();
    accept_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap();

    // Default window: trailing six months ending now.
    let params = MonthlyStatsParams {
        region_id: Some(region),
        ..MonthlyStatsParams::default()
    };
    let stats = monthly_statistics(params, &ctx.db_pool).await.unwrap();

    assert_eq!(stats.labels.len(), 6);
    assert_eq!(*stats.needs_published.last().unwrap(), 3);
    assert_eq!(*stats.matches_accepted.last().unwrap(), 1);
    assert_eq!(stats.summary.total_needs, 3);
    assert_eq!(stats.summary.total_accepted, 1);

    // Earlier months in the window are zero.
    assert!(stats.needs_published[..5].iter().all(|&c| c == 0));
    assert!(stats.matches_accepted[..5].iter().all(|&c| c == 0));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn service_type_filter_applies_to_both_series(ctx: &TestHarness) {
    let owner = normal_user();
    let region = RegionId::new();
    let need = create_test_need(&ctx.db_pool, owner, Some(region), "Cleaning job")
        .await
        .unwrap();
    let response = create_test_response(&ctx.db_pool, &need, normal_user())
        .await
        .unwrap();
    accept_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap();

    // Fixtures publish cleaning needs; a transport filter matches nothing.
    let params = MonthlyStatsParams {
        region_id: Some(region),
        service_type: Some(ServiceType::Transport),
        ..MonthlyStatsParams::default()
    };
    let stats = monthly_statistics(params, &ctx.db_pool).await.unwrap();
    assert_eq!(stats.summary.total_needs, 0);
    assert_eq!(stats.summary.total_accepted, 0);

    let params = MonthlyStatsParams {
        region_id: Some(region),
        service_type: Some(ServiceType::Cleaning),
        ..MonthlyStatsParams::default()
    };
    let stats = monthly_statistics(params, &ctx.db_pool).await.unwrap();
    assert_eq!(stats.summary.total_needs, 1);
    assert_eq!(stats.summary.total_accepted, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn bare_month_format_is_accepted(ctx: &TestHarness) {
    let params = MonthlyStatsParams {
        start_month: Some("202401".to_string()),
        end_month: Some("202403".to_string()),
        region_id: Some(RegionId::new()),
        service_type: None,
    };
    let stats = monthly_statistics(params, &ctx.db_pool).await.unwrap();
    assert_eq!(stats.labels, vec!["2024-01", "2024-02", "2024-03"]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invalid_windows_are_rejected(ctx: &TestHarness) {
    let err = monthly_statistics(
        MonthlyStatsParams {
            start_month: Some("2024-13".to_string()),
            ..MonthlyStatsParams::default()
        },
        &ctx.db_pool,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = monthly_statistics(
        MonthlyStatsParams {
            start_month: Some("2024-05".to_string()),
            end_month: Some("2024-01".to_string()),
            ..MonthlyStatsParams::default()
        },
        &ctx.db_pool,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn overview_is_admin_only_and_counts_grow(ctx: &TestHarness) {
    let err = platform_overview(normal_user(), &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Permission(_)));

    let before = platform_overview(admin_user(), &ctx.db_pool)
        .await
        .unwrap();

    let owner = normal_user();
    let need = create_test_need(&ctx.db_pool, owner, None, "A need")
        .await
        .unwrap();
    let response = create_test_response(&ctx.db_pool, &need, normal_user())
        .await
        .unwrap();

    // Our response is still Pending here; parallel tests may accept their
    // own, so only a floor can be asserted for this counter.
    let pending = platform_overview(admin_user(), &ctx.db_pool)
        .await
        .unwrap();
    assert!(pending.total_pending_responses >= 1);

    accept_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap();

    let after = platform_overview(admin_user(), &ctx.db_pool)
        .await
        .unwrap();

    // Tests in this binary only ever add data, so the counters are
    // monotonic even when tests run in parallel.
    assert!(after.total_needs >= before.total_needs + 1);
    assert!(after.total_matches >= before.total_matches + 1);
}
