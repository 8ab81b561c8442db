//! API middleware components

pub mod logging;
pub mod metrics;

use axum::{body::Body, extract::MatchedPath, http::Request};

pub use logging::{logging_middleware, REQUEST_ID_HEADER};
pub use self::metrics::metrics_middleware;

/// Route pattern when matched, raw path otherwise (keeps label cardinality low)
fn route_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}
