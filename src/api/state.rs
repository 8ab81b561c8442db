//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::{User, UserEventPublisher, UserRepository};
use crate::infrastructure::user::{
    CreateUserRequest, UpdateUserDetailsRequest, UserService, UserServiceError,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get_all(&self) -> Result<Vec<User>, UserServiceError>;
    async fn get(&self, id: &str) -> Result<User, UserServiceError>;
    async fn create(&self, request: CreateUserRequest) -> Result<User, UserServiceError>;
    async fn update_user_details(
        &self,
        id: &str,
        request: UpdateUserDetailsRequest,
    ) -> Result<User, UserServiceError>;
}

#[async_trait::async_trait]
impl<R, P> UserServiceTrait for UserService<R, P>
where
    R: UserRepository + ?Sized + 'static,
    P: UserEventPublisher + ?Sized + 'static,
{
    async fn get_all(&self) -> Result<Vec<User>, UserServiceError> {
        UserService::get_all(self).await
    }

    async fn get(&self, id: &str) -> Result<User, UserServiceError> {
        UserService::get(self, id).await
    }

    async fn create(&self, request: CreateUserRequest) -> Result<User, UserServiceError> {
        UserService::create(self, request).await
    }

    async fn update_user_details(
        &self,
        id: &str,
        request: UpdateUserDetailsRequest,
    ) -> Result<User, UserServiceError> {
        UserService::update_user_details(self, id, request).await
    }
}
