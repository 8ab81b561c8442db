//! Request/response logging middleware with sensitive header redaction

use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use super::route_path;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs each request and its completion, tagged with a request id.
///
/// The id is taken from `x-request-id` when present, generated otherwise, and
/// echoed on the response. No span is opened here: `TraceLayer` owns the span.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = route_path(&request);
    let request_id = extract_request_id(&request);

    info!(
        method = %method,
        path = %path,
        uri = %request.uri(),
        request_id = %request_id,
        headers = %redact_headers(&request),
        "Incoming request"
    );

    let mut response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            request_id = %request_id,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            request_id = %request_id,
            "Request completed"
        );
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

fn extract_request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Loggable headers, with credentials masked
fn redact_headers(request: &Request<Body>) -> String {
    request
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            let name = name.as_str().to_lowercase();

            if !should_log_header(&name) {
                return None;
            }

            let value = if is_sensitive_header(&name) {
                "[REDACTED]"
            } else {
                value.to_str().unwrap_or("[invalid]")
            };

            Some(format!("{}={}", name, value))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_sensitive_header(name: &str) -> bool {
    matches!(
        name,
        "authorization" | "proxy-authorization" | "cookie" | "set-cookie" | "x-api-key"
    )
}

fn should_log_header(name: &str) -> bool {
    matches!(
        name,
        "content-type"
            | "content-length"
            | "accept"
            | "user-agent"
            | "x-request-id"
            | "x-forwarded-for"
            | "authorization"
            | "cookie"
    )
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/users", get(|| async { StatusCode::OK }))
            .layer(middleware::from_fn(logging_middleware))
    }

    #[test]
    fn test_is_sensitive_header() {
        assert!(is_sensitive_header("authorization"));
        assert!(is_sensitive_header("cookie"));
        assert!(!is_sensitive_header("content-type"));
    }

    #[test]
    fn test_redact_headers() {
        let request = Request::builder()
            .header("authorization", "Bearer secret-token")
            .header("content-type", "application/json")
            .header("etag", "abc")
            .body(Body::empty())
            .unwrap();

        let logged = redact_headers(&request);

        assert!(logged.contains("authorization=[REDACTED]"));
        assert!(logged.contains("content-type=application/json"));
        assert!(!logged.contains("secret-token"));
        assert!(!logged.contains("etag"));
    }

    #[tokio::test]
    async fn test_echoes_incoming_request_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/users")
                    .header(REQUEST_ID_HEADER, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
    }

    #[tokio::test]
    async fn test_generates_request_id() {
        let response = app()
            .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }
}
