//! Cart service operations.

use dapr_store_core::Cart;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{Service, StoreApi, invoke_path};
use crate::error::ApiError;
use crate::transport::ApiResponse;

impl StoreApi {
    /// Set the quantity of a product in a user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn set_cart_product(
        &self,
        username: &str,
        product_id: &str,
        count: i64,
    ) -> Result<ApiResponse, ApiError> {
        self.raw_call(
            &invoke_path(
                Service::Cart,
                &format!("setProduct/{username}/{product_id}/{count}"),
            ),
            Some(Method::PUT),
            None,
        )
        .await
    }

    /// Fetch a user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, username: &str) -> Result<ApiResponse, ApiError> {
        self.raw_call(
            &invoke_path(Service::Cart, &format!("get/{username}")),
            Some(Method::GET),
            None,
        )
        .await
    }

    /// Submit a user's cart as a new order.
    ///
    /// The body is the username as a JSON string literal.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn submit_cart(&self, username: &str) -> Result<ApiResponse, ApiError> {
        self.raw_call(
            &invoke_path(Service::Cart, "submit"),
            Some(Method::POST),
            Some(Value::String(username.to_string())),
        )
        .await
    }

    /// Empty a user's cart.
    ///
    /// The body is the username as a JSON string literal.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, username: &str) -> Result<ApiResponse, ApiError> {
        self.raw_call(
            &invoke_path(Service::Cart, &format!("clear/{username}")),
            Some(Method::PUT),
            Some(Value::String(username.to_string())),
        )
        .await
    }

    /// Change a product's quantity in a user's cart by a signed amount.
    ///
    /// Reads the cart, computes the new quantity (never below zero) and writes
    /// it back with [`StoreApi::set_cart_product`]. The read and the write are
    /// separate calls, so two concurrent adjustments of the same product can
    /// lose one of the updates.
    ///
    /// # Errors
    ///
    /// Returns the error from fetching the cart (in which case nothing is
    /// written) or from the write.
    #[instrument(skip(self))]
    pub async fn add_cart_amount(
        &self,
        username: &str,
        product_id: &str,
        amount: i64,
    ) -> Result<ApiResponse, ApiError> {
        let cart_response = self.get_cart(username).await?;
        let existing = existing_quantity(&cart_response, product_id);
        let count = adjusted_quantity(existing, amount);

        debug!(?existing, amount, count, "Adjusting cart quantity");

        self.set_cart_product(username, product_id, count).await
    }
}

/// Quantity the cart response lists for a product, if it lists one.
fn existing_quantity(response: &ApiResponse, product_id: &str) -> Option<i64> {
    if !response.has_data() {
        return None;
    }
    response
        .json::<Cart>()
        .ok()
        .and_then(|cart| cart.quantity_of(product_id))
}

/// New quantity after applying `delta`, clamped at zero.
fn adjusted_quantity(existing: Option<i64>, delta: i64) -> i64 {
    existing
        .map_or(delta, |quantity| quantity.saturating_add(delta))
        .max(0)
}
