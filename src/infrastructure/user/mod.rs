//! User infrastructure module
//!
//! Repository implementations (in-memory and PostgreSQL) and the mutation
//! service that coordinates validation, persistence and event publishing.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UpdateUserDetailsRequest, UserService, UserServiceError};
