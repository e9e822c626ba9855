//! Contact book CLI - operator tools for the contact store.
//!
//! # Usage
//!
//! ```bash
//! # Create a user and print its id
//! cb-cli user create --name "Alice"
//!
//! # Seed demo users whose contact lists share numbers
//! cb-cli seed --users 5 --contacts-per-user 20
//! ```
//!
//! # Commands
//!
//! - `user create` - Create a user
//! - `seed` - Seed database with demo data
//!
//! Both commands create the schema first if it is missing.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cb-cli")]
#[command(author, version, about = "Contact book CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Seed database with demo users and contacts
    Seed {
        /// Number of users to create
        #[arg(long, default_value_t = 3)]
        users: u32,

        /// Contacts to give each user
        #[arg(long, default_value_t = 10)]
        contacts_per_user: u32,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::User { action } => match action {
            UserAction::Create { name } => {
                commands::user::create(&name).await?;
            }
        },
        Commands::Seed {
            users,
            contacts_per_user,
        } => commands::seed::demo_data(users, contacts_per_user).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_seed_defaults() {
        let cli = Cli::try_parse_from(["cb-cli", "seed"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Seed {
                users: 3,
                contacts_per_user: 10
            }
        ));
    }

    #[test]
    fn test_user_create_requires_name() {
        assert!(Cli::try_parse_from(["cb-cli", "user", "create"]).is_err());
    }
}
