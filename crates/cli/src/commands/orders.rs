//! `orders` subcommands.

use clap::Subcommand;
use dapr_store_client::{ApiResponse, StoreApi};
use dapr_store_core::Username;

use super::{CliError, require_user};

#[derive(Debug, Subcommand)]
pub enum OrderAction {
    /// Show one order
    Get {
        /// Order ID
        order_id: String,
    },
    /// List the signed-in user's orders
    List,
}

pub async fn run(
    api: &StoreApi,
    user: Option<&Username>,
    action: OrderAction,
) -> Result<ApiResponse, CliError> {
    let response = match action {
        OrderAction::Get { order_id } => api.get_order(&order_id).await?,
        OrderAction::List => {
            let username = require_user(user)?;
            api.get_orders_for_user(username.as_str()).await?
        }
    };
    Ok(response)
}
