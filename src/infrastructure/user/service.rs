//! User mutation service
//!
//! Orchestrates validation, persistence and event publishing. The write is
//! always committed before the event is published, so the bus never announces
//! a user that is not in the store. A failed publish is reported to the caller
//! together with the persisted user and the write is not undone: there is no
//! outbox, so the event for that mutation may be lost.
//!
//! Once validation passes, the write and the publish run on a spawned task
//! that outlives the caller. Dropping the caller's future cannot stop a
//! committed write short of its publish step.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::user::{
    validate_user, User, UserEventKind, UserEventPublisher, UserRepository, UserValidationError,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_publish_failure, record_user_mutation};

/// Request for creating a new user
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
}

/// Request for a partial update; empty fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDetailsRequest {
    pub name: String,
    pub last_name: String,
    pub email: String,
}

/// Errors returned by [`UserService`]
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Input was rejected before any side effect
    #[error(transparent)]
    Validation(#[from] UserValidationError),

    #[error("User '{id}' not found")]
    UserNotFound { id: String },

    /// Reading from the repository failed
    #[error("Reading users failed: {0}")]
    ReadFailed(DomainError),

    /// The write did not complete. `existing` is the last known-good state,
    /// `None` when the user was being created.
    #[error("Saving user failed: {source}")]
    SaveFailed {
        existing: Option<User>,
        source: DomainError,
    },

    /// The write was committed but its event could not be published
    #[error("User '{}' was saved but the {event} event was not published: {source}", .user.id())]
    PublishFailed {
        user: User,
        event: UserEventKind,
        source: DomainError,
    },
}

impl UserServiceError {
    /// The user as it is stored after a failed call, when known
    pub fn persisted_user(&self) -> Option<&User> {
        match self {
            Self::PublishFailed { user, .. } => Some(user),
            Self::SaveFailed { existing, .. } => existing.as_ref(),
            _ => None,
        }
    }

    /// Whether the failure was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// User service owning the create/update consistency policy
pub struct UserService<R: UserRepository + ?Sized, P: UserEventPublisher + ?Sized> {
    repository: Arc<R>,
    publisher: Arc<P>,
}

impl<R, P> UserService<R, P>
where
    R: UserRepository + ?Sized + 'static,
    P: UserEventPublisher + ?Sized + 'static,
{
    /// Create a new user service
    pub fn new(repository: Arc<R>, publisher: Arc<P>) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// List all users
    pub async fn get_all(&self) -> Result<Vec<User>, UserServiceError> {
        self.repository
            .get_all()
            .await
            .map_err(UserServiceError::ReadFailed)
    }

    /// Get a user by ID
    pub async fn get(&self, id: &str) -> Result<User, UserServiceError> {
        self.repository
            .get(id)
            .await
            .map_err(UserServiceError::ReadFailed)?
            .ok_or_else(|| UserServiceError::UserNotFound { id: id.to_string() })
    }

    /// Validate, persist and announce a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, UserServiceError> {
        debug!(user_id = %request.id, "Creating user");

        let user = validate_user(
            &request.id,
            &request.name,
            &request.last_name,
            &request.email,
        )
        .inspect_err(|_| record_user_mutation("create", "invalid"))?;

        let repository = Arc::clone(&self.repository);
        let publisher = Arc::clone(&self.publisher);

        run_detached(None, async move {
            let user = match repository.save(user).await {
                Ok(user) => user,
                Err(e) => {
                    error!(user_id = %request.id, error = %e, "Saving new user failed");
                    record_user_mutation("create", "save_failed");

                    return Err(UserServiceError::SaveFailed {
                        existing: None,
                        source: e,
                    });
                }
            };

            if let Err(e) = publisher.publish_created(&user).await {
                return Err(publish_failed(user, UserEventKind::Created, e));
            }

            info!(user_id = %user.id(), "User created");
            record_user_mutation("create", "ok");

            Ok(user)
        })
        .await
    }

    /// Apply a partial update to an existing user and announce it
    pub async fn update_user_details(
        &self,
        id: &str,
        request: UpdateUserDetailsRequest,
    ) -> Result<User, UserServiceError> {
        debug!(user_id = %id, "Updating user details");

        let existing = match self.repository.get(id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                record_user_mutation("update", "not_found");
                return Err(UserServiceError::UserNotFound { id: id.to_string() });
            }
            Err(e) => {
                record_user_mutation("update", "read_failed");
                return Err(UserServiceError::ReadFailed(e));
            }
        };

        let merged = existing
            .merge_details(&request.name, &request.last_name, &request.email)
            .inspect_err(|_| record_user_mutation("update", "invalid"))?;

        let repository = Arc::clone(&self.repository);
        let publisher = Arc::clone(&self.publisher);

        run_detached(Some(existing.clone()), async move {
            let updated = match repository.update(merged).await {
                Ok(user) => user,
                Err(e) => {
                    error!(user_id = %existing.id(), error = %e, "Saving user details failed");
                    record_user_mutation("update", "save_failed");

                    return Err(UserServiceError::SaveFailed {
                        existing: Some(existing),
                        source: e,
                    });
                }
            };

            if let Err(e) = publisher.publish_updated(&updated).await {
                return Err(publish_failed(updated, UserEventKind::Updated, e));
            }

            info!(user_id = %updated.id(), "User details updated");
            record_user_mutation("update", "ok");

            Ok(updated)
        })
        .await
    }
}

/// Run the write-then-publish steps of a mutation on their own task.
///
/// The caller's future may be dropped at any await point (request timeout,
/// client disconnect). Once a write has been started the task still runs
/// through the publish step, so its outcome is always logged and counted.
async fn run_detached<F>(existing: Option<User>, task: F) -> Result<User, UserServiceError>
where
    F: Future<Output = Result<User, UserServiceError>> + Send + 'static,
{
    match tokio::spawn(task).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            error!(error = %e, "User mutation task was cancelled");

            Err(UserServiceError::SaveFailed {
                existing,
                source: DomainError::internal(format!("User mutation task was cancelled: {}", e)),
            })
        }
    }
}

fn publish_failed(user: User, event: UserEventKind, source: DomainError) -> UserServiceError {
    warn!(
        user_id = %user.id(),
        event = %event,
        error = %source,
        "User persisted but event was not published; event may be lost"
    );

    record_user_mutation(event.discriminator(), "publish_failed");
    record_publish_failure(event);

    UserServiceError::PublishFailed {
        user,
        event,
        source,
    }
}
