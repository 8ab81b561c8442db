//! User endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CreateUserApiRequest, Json, UpdateUserApiRequest, UserResponse};

/// Routes for the user collection; mounted at the root and under `/api`
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    debug!("Listing users");

    let users = state.user_service.get_all().await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %id, "Getting user");

    let user = state.user_service.get(&id).await?;

    Ok(Json(UserResponse::from(user)))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(user_id = %request.id, "Creating user");

    let user = state.user_service.create(request.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %id, "Updating user");

    let user = state
        .user_service
        .update_user_details(&id, request.into())
        .await?;

    Ok(Json(UserResponse::from(user)))
}
