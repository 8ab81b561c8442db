//! Redis pub/sub user event publisher

use std::fmt;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::debug;

use crate::domain::user::{User, UserEvent, UserEventPublisher, DEFAULT_CHANNEL_PREFIX};
use crate::domain::DomainError;

/// Configuration for the Redis publisher
#[derive(Debug, Clone)]
pub struct RedisPublisherConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Channel prefix; events go to `<prefix>.create` / `<prefix>.update`
    pub channel_prefix: String,
}

impl RedisPublisherConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            channel_prefix: DEFAULT_CHANNEL_PREFIX.to_string(),
        }
    }

    /// Sets the channel prefix
    pub fn with_channel_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.channel_prefix = prefix.into();
        self
    }
}

/// Publishes user events with `PUBLISH`, one channel per event kind
#[derive(Clone)]
pub struct RedisUserEventPublisher {
    connection: ConnectionManager,
    config: RedisPublisherConfig,
}

impl fmt::Debug for RedisUserEventPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisUserEventPublisher")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisUserEventPublisher {
    /// Connects to Redis
    pub async fn new(config: RedisPublisherConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::configuration(format!("Invalid Redis URL: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::publish(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }

    async fn publish(&self, event: UserEvent) -> Result<(), DomainError> {
        let channel = event.channel(&self.config.channel_prefix);
        let payload = event.payload()?;
        let mut conn = self.connection.clone();

        let receivers: i64 = conn.publish(&channel, payload).await.map_err(|e| {
            DomainError::publish(format!("Failed to publish to '{}': {}", channel, e))
        })?;

        debug!(channel = %channel, receivers, "Published user event");
        Ok(())
    }
}

#[async_trait]
impl UserEventPublisher for RedisUserEventPublisher {
    async fn publish_created(&self, user: &User) -> Result<(), DomainError> {
        self.publish(UserEvent::created(user.clone())).await
    }

    async fn publish_updated(&self, user: &User) -> Result<(), DomainError> {
        self.publish(UserEvent::updated(user.clone())).await
    }
}
