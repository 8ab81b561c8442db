//! Storage factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use crate::config::StorageSettings;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

use super::migrations::run_user_migrations;

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    #[default]
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageType::InMemory => write!(f, "memory"),
            StorageType::Postgres => write!(f, "postgres"),
        }
    }
}

impl std::str::FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(StorageType::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(StorageType::Postgres),
            _ => Err(DomainError::configuration(format!(
                "Unknown storage backend: {}. Valid backends: memory, postgres",
                s
            ))),
        }
    }
}

/// Builds the user repository selected by configuration
pub async fn create_user_repository(
    settings: &StorageSettings,
) -> Result<Arc<dyn UserRepository>, DomainError> {
    match settings.backend.parse::<StorageType>()? {
        StorageType::InMemory => {
            info!("Using in-memory user storage");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
        StorageType::Postgres => {
            let url = settings.resolved_database_url().ok_or_else(|| {
                DomainError::configuration(
                    "A database URL is required for the postgres storage backend",
                )
            })?;

            let repository =
                PostgresUserRepository::connect(&url, settings.max_connections).await?;

            if settings.run_migrations {
                let applied = run_user_migrations(repository.pool()).await?;
                info!(applied, "User migrations up to date");
            }

            info!("Using PostgreSQL user storage");
            Ok(Arc::new(repository))
        }
    }
}
