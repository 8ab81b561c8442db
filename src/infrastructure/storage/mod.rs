//! Storage infrastructure - backend selection and schema migrations

mod factory;
pub mod migrations;

pub use factory::{create_user_repository, StorageType};
pub use migrations::{run_user_migrations, user_migrations, Migration, PostgresMigrator};
