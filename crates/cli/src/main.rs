//! Dapr Store CLI - Drive the store's backend services from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! store-cli products catalog
//!
//! # Add two of product 4 to alice's cart, then check out
//! store-cli --user alice cart add 4 2
//! store-cli --user alice cart submit
//!
//! # List alice's orders
//! store-cli --user alice orders list
//! ```
//!
//! # Environment Variables
//!
//! - `API_ENDPOINT` - Gateway base URL (e.g. `http://localhost:9000/`)
//! - `AUTH_CLIENT_ID` - Enables bearer-token auth when set
//! - `STORE_USERNAME` - Signed-in user (same as `--user`)
//! - `STORE_ACCESS_TOKEN` - Pre-issued access token sent as the bearer token
//! - `RUST_LOG` - Log filter (default: `warn`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use dapr_store_client::{ClientConfig, Identity, StaticAuth, StoreApi, TokenSession};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "store-cli")]
#[command(author, version, about = "Dapr Store command-line client")]
struct Cli {
    /// Gateway base URL (overrides `API_ENDPOINT`)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Signed-in username
    #[arg(short, long, global = true, env = "STORE_USERNAME")]
    user: Option<String>,

    /// Access token to send as the bearer token
    #[arg(long, global = true, env = "STORE_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register and look up users
    Users {
        #[command(subcommand)]
        action: commands::users::UserAction,
    },
    /// Browse and search products
    Products {
        #[command(subcommand)]
        action: commands::products::ProductAction,
    },
    /// Manage the signed-in user's cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// View orders
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrderAction,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads env-backed arguments
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = run(cli).await {
        tracing::debug!(error = ?e, "Command failed");
        commands::report_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(endpoint) = cli.endpoint.filter(|e| !e.is_empty()) {
        config.api_endpoint = endpoint;
    }

    let auth = StaticAuth::new(
        cli.user.map(Identity::new),
        cli.token.map(SecretString::from),
    );
    let api = StoreApi::with_reqwest(config, TokenSession::new(Arc::new(auth)));
    let user = api.session().user().map(|identity| identity.username);

    let response = match cli.command {
        Commands::Users { action } => commands::users::run(&api, action).await?,
        Commands::Products { action } => commands::products::run(&api, action).await?,
        Commands::Cart { action } => commands::cart::run(&api, user.as_ref(), action).await?,
        Commands::Orders { action } => commands::orders::run(&api, user.as_ref(), action).await?,
    };

    commands::print_response(&response)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use commands::cart::CartAction;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_negative_cart_amount() {
        let cli = Cli::try_parse_from(["store-cli", "--user", "alice", "cart", "add", "4", "-2"])
            .unwrap();
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Add { ref product_id, amount: -2 }
            } if product_id == "4"
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "store-cli",
            "products",
            "search",
            "hat",
            "--endpoint",
            "http://localhost:9000/",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:9000/"));
    }
}
