//! `products` subcommands.

use clap::Subcommand;
use dapr_store_client::{ApiResponse, StoreApi};

use super::CliError;

#[derive(Debug, Subcommand)]
pub enum ProductAction {
    /// List the full catalog
    Catalog,
    /// List products on offer
    Offers,
    /// Show one product
    Get {
        /// Product ID
        product_id: String,
    },
    /// Search products by text
    Search {
        /// Search text
        query: String,
    },
}

pub async fn run(api: &StoreApi, action: ProductAction) -> Result<ApiResponse, CliError> {
    let response = match action {
        ProductAction::Catalog => api.product_catalog().await?,
        ProductAction::Offers => api.product_offers().await?,
        ProductAction::Get { product_id } => api.get_product(&product_id).await?,
        ProductAction::Search { query } => api.search_products(&query).await?,
    };
    Ok(response)
}
