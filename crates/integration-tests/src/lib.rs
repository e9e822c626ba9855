//! Integration tests for the contact book API.
//!
//! These tests talk to a running server over HTTP and create their users
//! directly in the same database the server uses.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server against a scratch database
//! DATABASE_URL=postgres://localhost/contact_book cargo run -p contact-book-server
//!
//! # Run the ignored end-to-end tests
//! DATABASE_URL=postgres://localhost/contact_book \
//!     cargo test -p contact-book-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `CONTACT_BOOK_BASE_URL` - Server address (default `http://localhost:3000`)
//! - `DATABASE_URL` - Database the server is using

use reqwest::Client;
use secrecy::SecretString;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use contact_book_core::UserId;
use contact_book_server::config::PoolConfig;
use contact_book_server::db::{self, UserRepository};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("CONTACT_BOOK_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Shared handles for one test.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: PgPool,
}

impl TestContext {
    /// Connect to the database and prepare an HTTP client.
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is unset or the database is unreachable.
    pub async fn new() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .map(SecretString::from)
            .expect("DATABASE_URL must be set for integration tests");

        let pool = db::create_pool(&database_url, &PoolConfig::default())
            .await
            .expect("Failed to connect to database");
        db::ensure_schema(&pool)
            .await
            .expect("Failed to prepare database schema");

        Self {
            client: Client::new(),
            base_url: base_url(),
            pool,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Insert a user directly into the store.
    ///
    /// # Panics
    ///
    /// Panics if the insert fails.
    pub async fn create_user(&self, name: &str) -> UserId {
        UserRepository::new(&self.pool)
            .create(name)
            .await
            .expect("Failed to create test user")
            .id
    }
}

/// A phone number no other test run will have used.
#[must_use]
pub fn unique_number() -> String {
    format!("+1-test-{}", Uuid::new_v4().simple())
}

/// Body of a successful `GET /get-contacts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsPage {
    pub total_count: i64,
    pub rows: Vec<ContactRow>,
}

/// One contact as returned by the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRow {
    pub id: i32,
    pub name: String,
    pub number: String,
    pub user_id: i32,
}
