//! Database operations for the contact book `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Owners of contact lists
//! - `contacts` - `(name, number)` entries, unique per `(user_id, number)`
//!
//! # Schema
//!
//! The schema lives in `crates/server/migrations/` and is embedded into the
//! binary. [`ensure_schema`] applies any missing steps at startup; existing
//! tables and rows are never dropped.

pub mod contacts;
pub mod users;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::config::PoolConfig;

pub use contacts::ContactRepository;
pub use users::UserRepository;

/// Embedded schema for the `users` and `contacts` tables.
static SCHEMA: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., a contact pointing at a missing user).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The schema could not be brought up to date.
    #[error("schema error: {0}")]
    Schema(#[from] sqlx::migrate::MigrateError),
}

impl RepositoryError {
    /// Classify a write error, turning foreign key violations into `Conflict`.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_foreign_key_violation()
        {
            return Self::Conflict(db_err.message().to_owned());
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with the configured limits.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `limits` - Connection counts and acquire timeout
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &SecretString,
    limits: &PoolConfig,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(limits.max_connections)
        .min_connections(limits.min_connections)
        .acquire_timeout(limits.acquire_timeout)
        .connect(database_url.expose_secret())
        .await
}

/// Create the tables if they are absent.
///
/// Safe to call on every start: already-applied steps are skipped and data is
/// preserved.
///
/// # Errors
///
/// Returns `RepositoryError::Schema` if a step fails or the recorded schema
/// history does not match the embedded one.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepositoryError> {
    SCHEMA.run(pool).await?;
    tracing::info!(steps = SCHEMA.iter().count(), "Schema is up to date");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use contact_book_core::{ContactName, PhoneNumber};

    use super::*;
    use crate::models::NewContact;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn test_ensure_schema_keeps_existing_rows(pool: PgPool) {
        let user = UserRepository::new(&pool).create("Alice").await.unwrap();
        let contacts = ContactRepository::new(&pool);
        for i in 0..25 {
            let contact = NewContact {
                name: ContactName::parse(&format!("Contact {i}")).unwrap(),
                number: PhoneNumber::parse(&format!("555-{i:04}")).unwrap(),
            };
            contacts.insert_unless_duplicate(user.id, &contact).await.unwrap();
        }

        // Two restarts against the same database.
        ensure_schema(&pool).await.unwrap();
        ensure_schema(&pool).await.unwrap();

        assert_eq!(contacts.count_for_user(user.id).await.unwrap(), 25);
        assert!(UserRepository::new(&pool).get_by_id(user.id).await.unwrap().is_some());
    }
}
