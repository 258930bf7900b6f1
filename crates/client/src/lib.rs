//! Dapr Store API client.
//!
//! A thin facade that maps store operations (users, products, cart, orders)
//! onto HTTP calls through the service-invocation gateway, attaching a bearer
//! token when a user is signed in and auth is configured.
//!
//! # Architecture
//!
//! - [`StoreApi`] exposes one method per backend operation
//! - Every method goes through [`StoreApi::raw_call`], which composes the URL
//!   from [`ClientConfig`] and asks the [`TokenSession`] for a token
//! - Requests are sent by an injected [`Transport`]; [`ReqwestTransport`] is
//!   the default
//! - Failures are returned unchanged; [`decode_error`] turns one into a
//!   displayable [`ErrorPayload`] on request
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use dapr_store_client::{ClientConfig, StaticAuth, StoreApi, TokenSession};
//!
//! # async fn run() -> Result<(), dapr_store_client::ApiError> {
//! let config = ClientConfig::new("http://localhost:9000/");
//! let api = StoreApi::with_reqwest(config, TokenSession::new(Arc::new(StaticAuth::anonymous())));
//!
//! let products: Vec<dapr_store_core::Product> = api.product_catalog().await?.json()?;
//! api.add_cart_amount("alice", products[0].id.as_str(), 1).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod transport;

pub use api::StoreApi;
pub use auth::{AuthError, AuthProvider, Identity, StaticAuth, TokenSession};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ErrorPayload, decode_error};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};

pub use reqwest::{Method, StatusCode};
