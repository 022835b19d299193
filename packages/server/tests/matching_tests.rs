//! Integration tests for the matching engine: accept/reject transitions and
//! the append-only ledger, including under concurrency.

mod common;

use crate::common::{create_test_need, create_test_response, normal_user, TestHarness};
use helplink_core::common::{AppError, RegionId};
use helplink_core::domains::matching::activities::{accept_response, reject_response};
use helplink_core::domains::matching::models::AcceptedMatch;
use helplink_core::domains::responses::activities::{get_response, withdraw_response};
use helplink_core::domains::responses::models::ResponseStatus;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn accept_writes_one_ledger_row(ctx: &TestHarness) {
    let owner = normal_user();
    let region = RegionId::new();
    let need = create_test_need(&ctx.db_pool, owner, Some(region), "A need")
        .await
        .unwrap();
    let responder = normal_user();
    let response = create_test_response(&ctx.db_pool, &need, responder)
        .await
        .unwrap();

    let match_record = accept_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap();

    // Ledger row snapshots the need at accept time.
    assert_eq!(match_record.need_id, need.id);
    assert_eq!(match_record.need_owner_id, owner.id);
    assert_eq!(match_record.response_id, response.id);
    assert_eq!(match_record.responder_id, responder.id);
    assert_eq!(match_record.service_type, "cleaning");
    assert_eq!(match_record.region_id, Some(region));
    assert_eq!(match_record.accepted_date, chrono::Utc::now().date_naive());

    let fetched = get_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(fetched.status, ResponseStatus::Accepted);

    let stored = AcceptedMatch::find_by_response(response.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, match_record.id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_need_owner_decides(ctx: &TestHarness) {
    let owner = normal_user();
    let need = create_test_need(&ctx.db_pool, owner, None, "A need")
        .await
        .unwrap();
    let responder = normal_user();
    let response = create_test_response(&ctx.db_pool, &need, responder)
        .await
        .unwrap();

    // Neither the responder nor a stranger may accept.
    let err = accept_response(responder, response.id, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Permission(_)));
    let err = reject_response(normal_user(), response.id, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Permission(_)));

    // Nothing changed.
    let fetched = get_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(fetched.status, ResponseStatus::Pending);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn accept_is_not_repeatable(ctx: &TestHarness) {
    let owner = normal_user();
    let need = create_test_need(&ctx.db_pool, owner, None, "A need")
        .await
        .unwrap();
    let response = create_test_response(&ctx.db_pool, &need, normal_user())
        .await
        .unwrap();

    accept_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap();
    let err = accept_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Rejecting after acceptance is a conflict too.
    let err = reject_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reject_is_terminal_and_unledgered(ctx: &TestHarness) {
    let owner = normal_user();
    let need = create_test_need(&ctx.db_pool, owner, None, "A need")
        .await
        .unwrap();
    let response = create_test_response(&ctx.db_pool, &need, normal_user())
        .await
        .unwrap();

    let rejected = reject_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(rejected.status, ResponseStatus::Rejected);

    // No ledger row, and no late acceptance.
    assert!(AcceptedMatch::find_by_response(response.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
    let err = accept_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn withdrawn_response_cannot_be_accepted(ctx: &TestHarness) {
    let owner = normal_user();
    let need = create_test_need(&ctx.db_pool, owner, None, "A need")
        .await
        .unwrap();
    let responder = normal_user();
    let response = create_test_response(&ctx.db_pool, &need, responder)
        .await
        .unwrap();
    withdraw_response(responder, response.id, &ctx.db_pool)
        .await
        .unwrap();

    let err = accept_response(owner, response.id, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

/// Accepting one response leaves its siblings Pending; the owner may accept
/// several responses on the same need.
#[test_context(TestHarness)]
#[tokio::test]
async fn sibling_responses_stay_open(ctx: &TestHarness) {
    let owner = normal_user();
    let need = create_test_need(&ctx.db_pool, owner, None, "A need")
        .await
        .unwrap();
    let first = create_test_response(&ctx.db_pool, &need, normal_user())
        .await
        .unwrap();
    let second = create_test_response(&ctx.db_pool, &need, normal_user())
        .await
        .unwrap();

    accept_response(owner, first.id, &ctx.db_pool).await.unwrap();

    let fetched = get_response(owner, second.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(fetched.status, ResponseStatus::Pending);

    accept_response(owner, second.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(
        AcceptedMatch::count_for_need(need.id, &ctx.db_pool)
            .await
            .unwrap(),
        2
    );
}

/// The invariant the whole engine exists for: under concurrent accepts of
/// the same response, exactly one wins and exactly one ledger row exists.
#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_accepts_yield_one_match(ctx: &TestHarness) {
    let owner = normal_user();
    let need = create_test_need(&ctx.db_pool, owner, None, "A need")
        .await
        .unwrap();
    let response = create_test_response(&ctx.db_pool, &need, normal_user())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = ctx.db_pool.clone();
        let response_id = response.id;
        handles.push(tokio::spawn(async move {
            accept_response(owner, response_id, &pool).await
        }));
    }

    let mut wins = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(wins, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(
        AcceptedMatch::count_for_need(need.id, &ctx.db_pool)
            .await
            .unwrap(),
        1
    );
}
