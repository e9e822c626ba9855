//! User management commands.

use contact_book_core::UserId;
use contact_book_server::db::UserRepository;

use super::{CommandError, connect};

/// Create a new user.
///
/// # Returns
///
/// The ID of the created user.
pub async fn create(name: &str) -> Result<UserId, CommandError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::InvalidInput("name cannot be empty".to_owned()));
    }

    let pool = connect().await?;
    let user = UserRepository::new(&pool).create(name).await?;

    tracing::info!("User created successfully! ID: {}, Name: {}", user.id, user.name);

    pool.close().await;
    Ok(user.id)
}
