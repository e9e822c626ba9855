//! Seed the database with demo users and contacts.
//!
//! Contact `j` of every user carries the same number, so any two seeded users
//! share all numbers below the smaller contact count. That gives
//! `find-common-users` something to find.

use contact_book_core::{ContactName, PhoneNumber};
use contact_book_server::db::{ContactRepository, UserRepository};
use contact_book_server::models::NewContact;

use super::{CommandError, connect};

/// Seed `users` users with `contacts_per_user` contacts each.
///
/// Re-running adds new users; their contacts reuse the same numbers.
pub async fn demo_data(users: u32, contacts_per_user: u32) -> Result<(), CommandError> {
    let contacts = demo_contacts(contacts_per_user)?;
    let pool = connect().await?;

    let user_repo = UserRepository::new(&pool);
    let contact_repo = ContactRepository::new(&pool);

    for i in 1..=users {
        let user = user_repo.create(&format!("Demo User {i}")).await?;

        let mut inserted = 0_usize;
        for contact in &contacts {
            if contact_repo.insert_unless_duplicate(user.id, contact).await? {
                inserted += 1;
            }
        }

        let total = contact_repo.count_for_user(user.id).await?;
        tracing::info!(user_id = %user.id, inserted, total, "Seeded user");
    }

    tracing::info!("Seeding complete!");
    tracing::info!("  Users created: {users}");
    tracing::info!("  Contacts per user: {contacts_per_user}");

    pool.close().await;
    Ok(())
}

/// The contact list every seeded user receives.
fn demo_contacts(count: u32) -> Result<Vec<NewContact>, CommandError> {
    (0..count)
        .map(|j| {
            let name = ContactName::parse(&format!("Contact {j}"))
                .map_err(|e| CommandError::InvalidInput(e.to_string()))?;
            let number = PhoneNumber::parse(&format!("+1 555 {j:04}"))
                .map_err(|e| CommandError::InvalidInput(e.to_string()))?;
            Ok(NewContact { name, number })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_contacts_are_distinct() {
        let contacts = demo_contacts(12).unwrap();
        assert_eq!(contacts.len(), 12);
        assert_eq!(contacts[0].number.as_str(), "+1 555 0000");
        assert_eq!(contacts[11].name.as_str(), "Contact 11");

        let mut numbers: Vec<&str> = contacts.iter().map(|c| c.number.as_str()).collect();
        numbers.dedup();
        assert_eq!(numbers.len(), 12);
    }

    #[test]
    fn test_demo_contacts_empty() {
        assert!(demo_contacts(0).unwrap().is_empty());
    }
}
