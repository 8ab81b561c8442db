//! Domain layer - Core business logic and entities

pub mod error;
pub mod user;

pub use error::DomainError;
pub use user::{
    validate_user, User, UserEvent, UserEventKind, UserEventPublisher, UserRepository,
    UserValidationError,
};
