//! User service
//!
//! Validates user mutations, persists them through a repository and
//! announces each committed change on a message bus:
//! - Pluggable storage (in-memory, PostgreSQL)
//! - Pluggable event publishing (in-memory, Redis pub/sub)
//! - HTTP API with health probes and Prometheus metrics

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use self::config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::messaging::create_user_event_publisher;
use infrastructure::storage::create_user_repository;
use infrastructure::user::UserService;

/// Create application state, wiring the configured repository and publisher
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = create_user_repository(&config.storage).await?;
    let publisher = create_user_event_publisher(&config.messaging).await?;

    info!(
        storage = %config.storage.backend,
        messaging = %config.messaging.backend,
        "User service wired"
    );

    let user_service = UserService::new(repository, publisher);

    Ok(AppState::new(Arc::new(user_service)))
}
