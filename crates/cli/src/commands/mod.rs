//! Command implementations.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string (read from `.env` if present)

pub mod seed;
pub mod user;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use contact_book_server::config::PoolConfig;
use contact_book_server::db::{self, RepositoryError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Connect to `DATABASE_URL` and make sure the schema exists.
pub async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url, &PoolConfig::default()).await?;
    db::ensure_schema(&pool).await?;

    Ok(pool)
}
