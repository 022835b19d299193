//! Application setup and router assembly.

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::middleware::identity_middleware;
use crate::server::routes::{health, matching, needs, responses, stats};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Config,
}

/// Build the Axum application router.
///
/// Identity is resolved once per request by `identity_middleware`; handlers
/// that require a caller pull `ActingUser` out of the request extensions.
pub fn build_app(pool: PgPool, config: Config) -> Router {
    let app_state = AppState {
        db_pool: pool,
        config,
    };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/needs", post(needs::create_need_handler))
        .route("/needs", get(needs::list_needs_handler))
        .route("/needs/:need_id", get(needs::get_need_handler))
        .route("/needs/:need_id", patch(needs::update_need_handler))
        .route("/needs/:need_id", delete(needs::cancel_need_handler))
        .route(
            "/needs/:need_id/responses",
            get(responses::list_need_responses_handler),
        )
        .route(
            "/admin/needs/:need_id",
            delete(needs::force_cancel_need_handler),
        )
        .route("/my/needs", get(needs::list_my_needs_handler))
        .route("/my/responses", get(responses::list_my_responses_handler))
        .route("/responses", post(responses::create_response_handler))
        .route(
            "/responses/:response_id",
            get(responses::get_response_handler),
        )
        .route(
            "/responses/:response_id",
            patch(responses::update_response_handler),
        )
        .route(
            "/responses/:response_id",
            delete(responses::withdraw_response_handler),
        )
        .route(
            "/responses/:response_id/accept",
            post(matching::accept_response_handler),
        )
        .route(
            "/responses/:response_id/reject",
            post(matching::reject_response_handler),
        )
        .route("/stats/monthly", get(stats::monthly_statistics_handler))
        .route("/stats/overview", get(stats::overview_handler))
        // Health check needs no caller; identity extraction is lenient, so
        // header-less probe requests still pass through the layer.
        .route("/health", get(health::health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(identity_middleware))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
