//! Migrate command - applies PostgreSQL schema migrations

use anyhow::Context;
use tracing::info;

use crate::infrastructure::storage::{run_user_migrations, PostgresMigrator};
use crate::infrastructure::user::PostgresUserRepository;

/// Apply pending user migrations and exit
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap();

    let url = config
        .storage
        .resolved_database_url()
        .context("storage.database_url or DATABASE_URL must be set to run migrations")?;

    let repository = PostgresUserRepository::connect(&url, 1).await?;
    let applied = run_user_migrations(repository.pool()).await?;

    let version = PostgresMigrator::new(repository.pool().clone())
        .current_version()
        .await?;

    info!(applied, version = ?version, "Migrations complete");

    Ok(())
}
