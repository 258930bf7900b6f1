//! `cart` subcommands. All act on the signed-in user's cart.

use clap::Subcommand;
use dapr_store_client::{ApiResponse, StoreApi};
use dapr_store_core::Username;

use super::{CliError, require_user};

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Show the cart
    Get,
    /// Set a product's quantity
    Set {
        /// Product ID
        product_id: String,
        /// New quantity
        count: i64,
    },
    /// Change a product's quantity by a signed amount
    Add {
        /// Product ID
        product_id: String,
        /// Amount to add (negative to remove)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Submit the cart as an order
    Submit,
    /// Empty the cart
    Clear,
}

pub async fn run(
    api: &StoreApi,
    user: Option<&Username>,
    action: CartAction,
) -> Result<ApiResponse, CliError> {
    let username = require_user(user)?.as_str();

    let response = match action {
        CartAction::Get => api.get_cart(username).await?,
        CartAction::Set { product_id, count } => {
            api.set_cart_product(username, &product_id, count).await?
        }
        CartAction::Add { product_id, amount } => {
            api.add_cart_amount(username, &product_id, amount).await?
        }
        CartAction::Submit => api.submit_cart(username).await?,
        CartAction::Clear => api.clear_cart(username).await?,
    };
    Ok(response)
}
