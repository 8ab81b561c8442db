//! HTTP metrics middleware

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use super::route_path;
use crate::infrastructure::observability::record_http_request;

/// Records request count, latency and 5xx count per route
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = route_path(&request);

    let response = next.run(request).await;

    record_http_request(
        method.as_str(),
        &path,
        response.status().as_u16(),
        start.elapsed(),
    );

    response
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_passes_response_through() {
        let app = Router::new()
            .route("/users/{id}", get(|| async { StatusCode::NO_CONTENT }))
            .layer(middleware::from_fn(metrics_middleware));

        let response = app
            .oneshot(Request::builder().uri("/users/u1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
