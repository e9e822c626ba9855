//! User repository for database operations.
//!
//! Queries are built at runtime (`query_as`) so the crate builds without a
//! live database or an offline query cache.

use sqlx::PgPool;
use tracing::instrument;

use contact_book_core::UserId;

use super::RepositoryError;
use crate::models::User;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, name, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get every user whose ID appears in `ids`, ordered by ID.
    ///
    /// Repeated IDs yield a single row each.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn get_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = sqlx::query_as::<_, User>(
            r"
            SELECT id, name, created_at, updated_at
            FROM users
            WHERE id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(user_id = %user.id, "Created user");
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn test_create_and_get(pool: PgPool) {
        let repo = UserRepository::new(&pool);
        let created = repo.create("Alice").await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(repo.get_by_id(UserId::new(-1)).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn test_get_by_ids_collapses_repeats(pool: PgPool) {
        let repo = UserRepository::new(&pool);
        let bob = repo.create("Bob").await.unwrap();
        let alice = repo.create("Alice").await.unwrap();

        let users = repo
            .get_by_ids(&[alice.id, bob.id, alice.id, UserId::new(-1)])
            .await
            .unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Alice"]);

        assert!(repo.get_by_ids(&[]).await.unwrap().is_empty());
    }
}
