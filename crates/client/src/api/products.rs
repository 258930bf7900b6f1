//! Products service operations.

use tracing::instrument;

use super::{Service, StoreApi, invoke_path};
use crate::error::ApiError;
use crate::transport::ApiResponse;

impl StoreApi {
    /// Fetch the full product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn product_catalog(&self) -> Result<ApiResponse, ApiError> {
        self.raw_call(&invoke_path(Service::Products, "catalog"), None, None)
            .await
    }

    /// Fetch products currently on offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn product_offers(&self) -> Result<ApiResponse, ApiError> {
        self.raw_call(&invoke_path(Service::Products, "offers"), None, None)
            .await
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: &str) -> Result<ApiResponse, ApiError> {
        self.raw_call(
            &invoke_path(Service::Products, &format!("get/{product_id}")),
            None,
            None,
        )
        .await
    }

    /// Search products by free text.
    ///
    /// The query goes into the path as-is; callers escape it if they need to.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: &str) -> Result<ApiResponse, ApiError> {
        self.raw_call(
            &invoke_path(Service::Products, &format!("search/{query}")),
            None,
            None,
        )
        .await
    }
}
