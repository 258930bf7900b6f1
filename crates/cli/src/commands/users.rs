//! `users` subcommands.

use clap::Subcommand;
use dapr_store_client::{ApiResponse, StoreApi};
use dapr_store_core::User;

use super::CliError;

#[derive(Debug, Subcommand)]
pub enum UserAction {
    /// Register a new user
    Register {
        /// Username to register
        username: String,

        /// Display name (defaults to the username)
        #[arg(short, long)]
        display_name: Option<String>,
    },
    /// Show a user's profile
    Get {
        /// Username to look up
        username: String,
    },
    /// Check whether a username is registered
    Check {
        /// Username to check
        username: String,
    },
}

pub async fn run(api: &StoreApi, action: UserAction) -> Result<ApiResponse, CliError> {
    let response = match action {
        UserAction::Register {
            username,
            display_name,
        } => {
            let display_name = display_name.unwrap_or_else(|| username.clone());
            api.register_user(&User::new(username, display_name)).await?
        }
        UserAction::Get { username } => api.get_user(&username).await?,
        UserAction::Check { username } => api.check_registration(&username).await?,
    };
    Ok(response)
}
