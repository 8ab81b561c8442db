//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MetricsConfig;
use crate::domain::user::UserEventKind;

static UUID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").unwrap()
});

static USER_ID_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/api)?/users/[^/]+(/|$)").unwrap());

static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\d+(/|$)").unwrap());

const MAX_PATH_LABEL_LEN: usize = 50;

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
    path: String,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Path the metrics endpoint is served on
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            register_default_metrics();

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
                path: config.path.clone(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

fn register_default_metrics() {
    gauge!("user_service_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    let path = metrics.path.clone();
    Router::new()
        .route(&path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record the outcome of a create/update call
pub fn record_user_mutation(operation: &'static str, outcome: &'static str) {
    counter!(
        "user_mutations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record an event that was not delivered after its mutation persisted
pub fn record_publish_failure(event: UserEventKind) {
    counter!(
        "user_event_publish_failures_total",
        "event" => event.discriminator()
    )
    .increment(1);
}

/// Sanitize URL path for metric labels (collapse IDs, limit cardinality)
fn sanitize_path(path: &str) -> String {
    let path = USER_ID_SEGMENT.replace(path, "${1}/users/{id}${2}");
    let path = UUID_SEGMENT.replace_all(&path, "{id}");
    let path = NUMERIC_SEGMENT.replace_all(&path, "/{id}$1");

    path.chars().take(MAX_PATH_LABEL_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path_user_id() {
        assert_eq!(sanitize_path("/users/abc-123"), "/users/{id}");
        assert_eq!(sanitize_path("/api/users/john.doe"), "/api/users/{id}");
    }

    #[test]
    fn test_sanitize_path_user_collection() {
        assert_eq!(sanitize_path("/users"), "/users");
        assert_eq!(sanitize_path("/api/users"), "/api/users");
    }

    #[test]
    fn test_sanitize_path_uuid() {
        let path = "/v1/items/550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(sanitize_path(path), "/v1/items/{id}");
    }

    #[test]
    fn test_sanitize_path_numeric_id() {
        assert_eq!(sanitize_path("/orders/123/lines"), "/orders/{id}/lines");
    }

    #[test]
    fn test_sanitize_path_no_id() {
        assert_eq!(sanitize_path("/health"), "/health");
    }

    #[test]
    fn test_sanitize_path_truncates_long_paths() {
        let path = "/very/long/path/that/exceeds/the/maximum/allowed/length/for/metrics";
        assert!(sanitize_path(path).len() <= MAX_PATH_LABEL_LEN);
    }

    #[test]
    fn test_record_without_recorder_is_noop() {
        record_http_request("GET", "/users", 200, Duration::from_millis(5));
        record_user_mutation("create", "ok");
        record_publish_failure(UserEventKind::Updated);
    }
}
