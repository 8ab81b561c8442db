//! User request/response bodies

use serde::{Deserialize, Serialize};

use crate::domain::user::User;
use crate::infrastructure::user::{CreateUserRequest, UpdateUserDetailsRequest};

/// Body of `POST /users`. Absent fields arrive as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserApiRequest {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
}

impl From<CreateUserApiRequest> for CreateUserRequest {
    fn from(request: CreateUserApiRequest) -> Self {
        Self {
            id: request.id,
            name: request.name,
            last_name: request.last_name,
            email: request.email,
        }
    }
}

/// Body of `PUT /users/{id}`. Empty or absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserApiRequest {
    pub name: String,
    pub last_name: String,
    pub email: String,
}

impl From<UpdateUserApiRequest> for UpdateUserDetailsRequest {
    fn from(request: UpdateUserApiRequest) -> Self {
        Self {
            name: request.name,
            last_name: request.last_name,
            email: request.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
