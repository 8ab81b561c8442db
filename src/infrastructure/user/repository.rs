//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let users_map = users
            .into_iter()
            .map(|user| (user.id().to_string(), user))
            .collect();

        Self {
            users: Arc::new(RwLock::new(users_map)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.id().cmp(b.id()));

        Ok(result)
    }

    async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let id = user.id().to_string();

        if users.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                id
            )));
        }

        users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(id: &str, name: &str) -> User {
        User::new(id, name, "doe", &format!("{}@example.com", name)).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("user-1", "john");

        repo.save(user.clone()).await.unwrap();

        let retrieved = repo.get("user-1").await.unwrap();
        assert_eq!(retrieved, Some(user));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id() {
        let repo = InMemoryUserRepository::new();
        let user1 = create_test_user("user-1", "john");
        let user2 = create_test_user("user-1", "jane");

        repo.save(user1.clone()).await.unwrap();

        let result = repo.save(user2).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));

        // First user is untouched
        assert_eq!(repo.get("user-1").await.unwrap(), Some(user1));
    }

    #[tokio::test]
    async fn test_update() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("user-1", "john");

        repo.save(user.clone()).await.unwrap();

        let changed = user.merge_details("johnny", "", "").unwrap();
        repo.update(changed.clone()).await.unwrap();

        let retrieved = repo.get("user-1").await.unwrap().unwrap();
        assert_eq!(retrieved.name(), "johnny");
        assert_eq!(retrieved, changed);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("user-1", "john");

        let result = repo.update(user).await;
        assert!(matches!(result, Err(ref e) if e.is_not_found()));
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_sorted() {
        let repo = InMemoryUserRepository::new();

        assert!(repo.get_all().await.unwrap().is_empty());

        repo.save(create_test_user("user-2", "jane")).await.unwrap();
        repo.save(create_test_user("user-1", "john")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|u| u.id()).collect();
        assert_eq!(ids, vec!["user-1", "user-2"]);
    }

    #[tokio::test]
    async fn test_with_users() {
        let repo = InMemoryUserRepository::with_users(vec![
            create_test_user("user-1", "john"),
            create_test_user("user-2", "jane"),
        ]);

        assert_eq!(repo.get_all().await.unwrap().len(), 2);
        assert!(repo.get("user-2").await.unwrap().is_some());
    }
}
