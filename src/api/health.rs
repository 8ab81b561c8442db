//! Health check endpoints for liveness and readiness probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::api::types::Json;
use serde::Serialize;

use super::state::AppState;
use crate::infrastructure::user::UserServiceError;

/// Looked up on every readiness check; a single-row read, never expected to exist
const READINESS_LOOKUP_ID: &str = "__readiness__";

/// Detailed health response with component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Simple health check - returns 200 if the service is running
/// Used for basic liveness probes
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check with dependency verification
/// Unhealthy when the user store cannot be read
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let user_store = check_user_store(&state).await;
    let overall_status = user_store.status;

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![user_store]),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Liveness check - simple check to verify the service is running
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn check_user_store(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let result = state.user_service.get(READINESS_LOOKUP_ID).await;
    let latency_ms = Some(start.elapsed().as_millis() as u64);

    match result {
        Ok(_) | Err(UserServiceError::UserNotFound { .. }) => HealthCheck {
            name: "user_store".to_string(),
            status: HealthStatus::Healthy,
            message: None,
            latency_ms,
        },
        Err(e) => HealthCheck {
            name: "user_store".to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            latency_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::user::{MockUserRepository, UserEventPublisher, UserRepository};
    use crate::domain::DomainError;
    use crate::infrastructure::messaging::InMemoryUserEventPublisher;
    use crate::infrastructure::user::{InMemoryUserRepository, UserService};

    fn state_with_repository(repository: Arc<dyn UserRepository>) -> AppState {
        let publisher: Arc<dyn UserEventPublisher> = Arc::new(InMemoryUserEventPublisher::new());
        AppState::new(Arc::new(UserService::new(repository, publisher)))
    }

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn test_health_response_omits_empty_fields() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "1.0.0".to_string(),
            checks: None,
            latency_ms: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"version\":\"1.0.0\""));
        assert!(!json.contains("checks"));
        assert!(!json.contains("latency_ms"));
    }

    #[tokio::test]
    async fn test_ready_when_store_readable() {
        let state = state_with_repository(Arc::new(InMemoryUserRepository::new()));

        let response = ready_check(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_check_does_not_list_users() {
        let mut repository = MockUserRepository::new();
        repository.expect_get_all().times(0);
        repository
            .expect_get()
            .withf(|id: &str| id == READINESS_LOOKUP_ID)
            .times(1)
            .returning(|_| Ok(None));
        let state = state_with_repository(Arc::new(repository));

        let response = ready_check(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unavailable_when_store_fails() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get()
            .returning(|_| Err(DomainError::storage("connection refused")));
        let state = state_with_repository(Arc::new(repository));

        let response = ready_check(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_live_check() {
        assert_eq!(live_check().await.into_response().status(), StatusCode::OK);
    }
}
