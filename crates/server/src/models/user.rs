//! User domain types.

use chrono::{DateTime, Utc};

use contact_book_core::UserId;

/// The owner of a contact list.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name, returned by the common-users lookup.
    pub name: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
