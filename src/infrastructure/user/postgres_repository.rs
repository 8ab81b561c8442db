//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool and wrap it
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, last_name, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, last_name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, last_name, email)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id())
        .bind(user.name())
        .bind(user.last_name())
        .bind(user.email())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("User with ID '{}' already exists", user.id()))
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, last_name = $3, email = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id())
        .bind(user.name())
        .bind(user.last_name())
        .bind(user.email())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        Ok(user)
    }
}

/// Rows are trusted: only validated users are ever written
fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let read = |column: &str| -> Result<String, DomainError> {
        row.try_get(column)
            .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", column, e)))
    };

    Ok(User::from_parts(
        read("id")?,
        read("name")?,
        read("last_name")?,
        read("email")?,
    ))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
    }
}
