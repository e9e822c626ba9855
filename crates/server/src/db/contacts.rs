//! Contact repository for database operations.

use sqlx::PgPool;
use tracing::instrument;

use contact_book_core::{Page, PageRequest, UserId};

use super::RepositoryError;
use crate::models::{Contact, NewContact};

/// Repository for contact database operations.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a contact for `user_id` unless that user already holds the number.
    ///
    /// Returns `true` if a row was written, `false` if it was a duplicate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if `user_id` does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, contact))]
    pub async fn insert_unless_duplicate(
        &self,
        user_id: UserId,
        contact: &NewContact,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO contacts (name, number, user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, number) DO NOTHING
            ",
        )
        .bind(&contact.name)
        .bind(&contact.number)
        .bind(user_id)
        .execute(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(result.rows_affected() == 1)
    }

    /// Owners of every contact stored under exactly `number`, in contact order.
    ///
    /// A user appears once per matching contact; the list is not deduplicated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, number))]
    pub async fn owner_ids_by_number(&self, number: &str) -> Result<Vec<UserId>, RepositoryError> {
        let owners = sqlx::query_scalar::<_, UserId>(
            r"
            SELECT user_id
            FROM contacts
            WHERE number = $1
            ORDER BY id
            ",
        )
        .bind(number)
        .fetch_all(self.pool)
        .await?;

        Ok(owners)
    }

    /// One page of a user's contacts, optionally filtered by a
    /// case-insensitive substring of the name.
    ///
    /// An empty `search_text` is treated as no filter. The total count
    /// ignores the window, so a page past the end is empty but still reports
    /// how many rows match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    #[instrument(skip(self), fields(page = window.page(), page_size = window.page_size()))]
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        search_text: Option<&str>,
        window: PageRequest,
    ) -> Result<Page<Contact>, RepositoryError> {
        let pattern = search_text
            .filter(|text| !text.is_empty())
            .map(|text| format!("%{}%", escape_like(text)));

        let total_count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM contacts
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR name ILIKE $2 ESCAPE '\')
            ",
        )
        .bind(user_id)
        .bind(pattern.as_deref())
        .fetch_one(self.pool)
        .await?;

        if window.expected_len(total_count) == 0 {
            return Ok(Page::empty(total_count));
        }

        let rows = sqlx::query_as::<_, Contact>(
            r"
            SELECT id, name, number, user_id, created_at, updated_at
            FROM contacts
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR name ILIKE $2 ESCAPE '\')
            ORDER BY id
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(user_id)
        .bind(pattern.as_deref())
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(Page { total_count, rows })
    }

    /// Number of contacts a user holds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_user(&self, user_id: UserId) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

/// Escape `LIKE` metacharacters so `text` matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
