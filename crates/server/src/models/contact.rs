//! Contact domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use contact_book_core::{ContactId, ContactName, PhoneNumber, UserId};

/// A stored contact, as returned by the contact listing.
///
/// Serializes as `{id, name, number, userId, createdAt, updatedAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Database ID of this contact.
    pub id: ContactId,
    /// Name the owner saved the contact under.
    pub name: ContactName,
    /// Phone number, verbatim.
    pub number: PhoneNumber,
    /// Owning user; never reassigned.
    pub user_id: UserId,
    /// When the contact was first synced.
    pub created_at: DateTime<Utc>,
    /// When the contact was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A contact submitted for sync.
///
/// Fields are validated during deserialization: a blank or oversized number,
/// or an oversized name, rejects the whole request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewContact {
    pub name: ContactName,
    pub number: PhoneNumber,
}
