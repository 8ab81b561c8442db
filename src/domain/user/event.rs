//! User domain events

use serde::Serialize;

use super::entity::User;
use crate::domain::DomainError;

/// Default channel prefix for user events
pub const DEFAULT_CHANNEL_PREFIX: &str = "user";

/// Kind of mutation an event announces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserEventKind {
    Created,
    Updated,
}

impl UserEventKind {
    /// Routing discriminator used on the bus
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::Created => "create",
            Self::Updated => "update",
        }
    }
}

impl std::fmt::Display for UserEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.discriminator())
    }
}

/// A persisted user mutation, ready to be published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEvent {
    pub kind: UserEventKind,
    pub user: User,
}

impl UserEvent {
    pub fn created(user: User) -> Self {
        Self {
            kind: UserEventKind::Created,
            user,
        }
    }

    pub fn updated(user: User) -> Self {
        Self {
            kind: UserEventKind::Updated,
            user,
        }
    }

    /// Channel (routing key) for this event, e.g. `user.create`
    pub fn channel(&self, prefix: &str) -> String {
        format!("{}.{}", prefix, self.kind.discriminator())
    }

    /// Message body: the JSON-serialized user
    pub fn payload(&self) -> Result<String, DomainError> {
        serde_json::to_string(&self.user)
            .map_err(|e| DomainError::publish(format!("Failed to serialize user event: {}", e)))
    }
}
