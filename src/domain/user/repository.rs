//! User repository trait

use async_trait::async_trait;

use super::entity::User;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for user storage
///
/// Implementations must be safe for concurrent use. Cancellation is
/// expressed by dropping the returned future.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users; an empty store yields an empty list
    async fn get_all(&self) -> Result<Vec<User>, DomainError>;

    /// Get a user by ID, `None` if it does not exist
    async fn get(&self, id: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user; fails with a conflict if the ID already exists
    async fn save(&self, user: User) -> Result<User, DomainError>;

    /// Replace an existing user; fails with not found if the ID is unknown
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
