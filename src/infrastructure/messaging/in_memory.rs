//! In-memory user event publisher

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::domain::user::{User, UserEvent, UserEventPublisher};
use crate::domain::DomainError;

const SUBSCRIBER_CAPACITY: usize = 256;

/// Records published events and fans them out to local subscribers.
///
/// Used for development and tests. Can be switched into a failing mode to
/// simulate an unavailable bus, or delayed to simulate a slow one.
#[derive(Debug, Clone)]
pub struct InMemoryUserEventPublisher {
    events: Arc<RwLock<Vec<UserEvent>>>,
    should_fail: Arc<RwLock<bool>>,
    delay: Arc<RwLock<Duration>>,
    sender: broadcast::Sender<UserEvent>,
}

impl Default for InMemoryUserEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserEventPublisher {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(SUBSCRIBER_CAPACITY);
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(RwLock::new(false)),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            sender,
        }
    }

    /// Receives every event published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<UserEvent> {
        self.sender.subscribe()
    }

    /// Events published so far, oldest first
    pub async fn published(&self) -> Vec<UserEvent> {
        self.events.read().await.clone()
    }

    /// Make subsequent publishes fail
    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    /// Wait this long before each publish
    pub async fn set_publish_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    async fn publish(&self, event: UserEvent) -> Result<(), DomainError> {
        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if *self.should_fail.read().await {
            return Err(DomainError::publish(format!(
                "Message bus unavailable for {} event",
                event.kind
            )));
        }

        self.events.write().await.push(event.clone());

        // No subscribers is not an error
        let receivers = self.sender.send(event).unwrap_or(0);
        debug!(receivers, "Delivered user event in memory");

        Ok(())
    }
}

#[async_trait]
impl UserEventPublisher for InMemoryUserEventPublisher {
    async fn publish_created(&self, user: &User) -> Result<(), DomainError> {
        self.publish(UserEvent::created(user.clone())).await
    }

    async fn publish_updated(&self, user: &User) -> Result<(), DomainError> {
        self.publish(UserEvent::updated(user.clone())).await
    }
}
