//! Orders service operations.

use tracing::instrument;

use super::{Service, StoreApi, invoke_path};
use crate::error::ApiError;
use crate::transport::ApiResponse;

impl StoreApi {
    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str) -> Result<ApiResponse, ApiError> {
        self.raw_call(
            &invoke_path(Service::Orders, &format!("get/{order_id}")),
            None,
            None,
        )
        .await
    }

    /// Fetch the IDs of all orders placed by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_orders_for_user(&self, username: &str) -> Result<ApiResponse, ApiError> {
        self.raw_call(
            &invoke_path(Service::Orders, &format!("getForUser/{username}")),
            None,
            None,
        )
        .await
    }
}
