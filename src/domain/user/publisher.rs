//! User event publisher trait

use async_trait::async_trait;

use super::entity::User;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Emits one bus message per call. Delivery guarantees and retries belong
/// to the implementation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserEventPublisher: Send + Sync {
    /// Announce a newly persisted user
    async fn publish_created(&self, user: &User) -> Result<(), DomainError>;

    /// Announce a persisted change to an existing user
    async fn publish_updated(&self, user: &User) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_publisher() {
        let mut mock = MockUserEventPublisher::new();
        let user = User::new("u1", "John", "Doe", "john@doe.com").unwrap();

        mock.expect_publish_created()
            .withf(|user: &User| user.id() == "u1")
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_publish_updated()
            .returning(|_| Err(DomainError::publish("bus down")));

        assert!(mock.publish_created(&user).await.is_ok());
        assert!(mock.publish_updated(&user).await.is_err());
    }
}
