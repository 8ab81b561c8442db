use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;
use super::users;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the full router with application state.
///
/// User routes are served at `/users` and again under `/api`. Requests that
/// exceed `request_timeout` are cancelled and answered with `408`.
pub fn create_router(
    state: AppState,
    metrics: Option<PrometheusMetrics>,
    request_timeout: Duration,
) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .merge(users::create_users_router())
        .nest("/api", users::create_users_router())
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http());

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m));
    }

    router
}
