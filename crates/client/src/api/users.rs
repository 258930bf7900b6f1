//! Users service operations.

use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

use super::{Service, StoreApi, invoke_path};
use crate::error::ApiError;
use crate::transport::ApiResponse;

impl StoreApi {
    /// Register a new user.
    ///
    /// The record is sent as the JSON body; `dapr_store_core::User` is the
    /// usual shape, but any serializable value is accepted.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Parse` if the record cannot be serialized, otherwise
    /// whatever the transport returns.
    #[instrument(skip(self, user))]
    pub async fn register_user<U>(&self, user: &U) -> Result<ApiResponse, ApiError>
    where
        U: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(user)?;
        self.raw_call(
            &invoke_path(Service::Users, "register"),
            Some(Method::POST),
            Some(body),
        )
        .await
    }

    /// Fetch a user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_user(&self, username: &str) -> Result<ApiResponse, ApiError> {
        self.raw_call(
            &invoke_path(Service::Users, &format!("get/{username}")),
            None,
            None,
        )
        .await
    }

    /// Check whether a username is registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn check_registration(&self, username: &str) -> Result<ApiResponse, ApiError> {
        self.raw_call(
            &invoke_path(Service::Users, &format!("isregistered/{username}")),
            None,
            None,
        )
        .await
    }
}
