//! User domain
//!
//! This module provides the user aggregate, its validation rules, the
//! events it emits and the repository/publisher ports the service uses.

mod entity;
mod event;
mod publisher;
mod repository;
mod validation;

pub use entity::User;
pub use event::{UserEvent, UserEventKind, DEFAULT_CHANNEL_PREFIX};
pub use publisher::UserEventPublisher;
pub use repository::UserRepository;
pub use validation::{
    is_valid_email, is_valid_name, validate_details, validate_user, UserValidationError,
};

#[cfg(test)]
pub use publisher::MockUserEventPublisher;
#[cfg(test)]
pub use repository::MockUserRepository;
