//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use vigil_auth::TokenValidator;
use vigil_desk::ReportDesk;

use crate::handlers::{counters, dashboard, health, reports};
use crate::state::GatewayState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Reports (authenticated)
/// - `POST /v1/reports` - Submit report (staff/admin)
/// - `GET /v1/reports` - List reports (optionally `?category=`)
/// - `GET /v1/reports/{report_id}` - Get report
/// - `POST /v1/reports/{report_id}/review` - Move report into review
/// - `POST /v1/reports/{report_id}/close` - Close report
///
/// ## Dashboard (authenticated)
/// - `GET /v1/dashboard` - Aggregate statistics
///
/// ## Counters (admin)
/// - `GET /v1/counters/{category}` - Read a reference counter
/// - `POST /v1/counters/{category}/reset` - Reset a reference counter
pub fn create_router<D, V>(state: GatewayState<D, V>) -> Router
where
    D: ReportDesk + 'static,
    V: TokenValidator + 'static,
{
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    // Build the router
    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Reports
        .route(
            "/v1/reports",
            get(reports::list_reports::<D, V>).post(reports::submit_report::<D, V>),
        )
        .route(
            "/v1/reports/{report_id}",
            get(reports::get_report::<D, V>),
        )
        // Workflow actions
        .route(
            "/v1/reports/{report_id}/review",
            post(reports::review_report::<D, V>),
        )
        .route(
            "/v1/reports/{report_id}/close",
            post(reports::close_report::<D, V>),
        )
        // Dashboard
        .route("/v1/dashboard", get(dashboard::get_dashboard::<D, V>))
        // Counter administration
        .route(
            "/v1/counters/{category}",
            get(counters::get_counter::<D, V>),
        )
        .route(
            "/v1/counters/{category}/reset",
            post(counters::reset_counter::<D, V>),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %o, error = %e, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
