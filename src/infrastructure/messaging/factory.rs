//! Publisher factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use crate::config::MessagingSettings;
use crate::domain::user::UserEventPublisher;
use crate::domain::DomainError;

use super::in_memory::InMemoryUserEventPublisher;
use super::redis::{RedisPublisherConfig, RedisUserEventPublisher};

/// Supported message bus backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublisherType {
    #[default]
    InMemory,
    Redis,
}

impl std::fmt::Display for PublisherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublisherType::InMemory => write!(f, "memory"),
            PublisherType::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for PublisherType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(PublisherType::InMemory),
            "redis" => Ok(PublisherType::Redis),
            _ => Err(DomainError::configuration(format!(
                "Unknown messaging backend: {}. Valid backends: memory, redis",
                s
            ))),
        }
    }
}

/// Builds the event publisher selected by configuration
pub async fn create_user_event_publisher(
    settings: &MessagingSettings,
) -> Result<Arc<dyn UserEventPublisher>, DomainError> {
    match settings.backend.parse::<PublisherType>()? {
        PublisherType::InMemory => {
            info!("Using in-memory user event publisher");
            Ok(Arc::new(InMemoryUserEventPublisher::new()))
        }
        PublisherType::Redis => {
            let url = settings.resolved_redis_url().ok_or_else(|| {
                DomainError::configuration("A Redis URL is required for the redis messaging backend")
            })?;

            let config =
                RedisPublisherConfig::new(url).with_channel_prefix(settings.channel_prefix.clone());
            let publisher = RedisUserEventPublisher::new(config).await?;

            info!(prefix = %settings.channel_prefix, "Using Redis user event publisher");
            Ok(Arc::new(publisher))
        }
    }
}
