//! Store API facade.
//!
//! One method per backend operation. Every method builds a gateway path,
//! picks an HTTP method and optional JSON body, and forwards to
//! [`StoreApi::raw_call`], which attaches a bearer token when a user is signed
//! in and an auth client ID is configured.
//!
//! # Gateway paths
//!
//! Backend services are reached through the service-invocation gateway:
//! `v1.0/invoke/<service>/method/<operation>[/<args>]`. Arguments are
//! interpolated into the path without escaping.

mod cart;
mod orders;
mod products;
mod users;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::auth::TokenSession;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};

/// Gateway API version prefix.
const API_VERSION: &str = "v1.0";

/// Backend services reachable through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Service {
    Users,
    Products,
    Cart,
    Orders,
}

impl Service {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Products => "products",
            Self::Cart => "cart",
            Self::Orders => "orders",
        }
    }
}

/// Gateway path for a service operation.
pub(crate) fn invoke_path(service: Service, operation: &str) -> String {
    format!(
        "{API_VERSION}/invoke/{}/method/{operation}",
        service.as_str()
    )
}

/// Client facade over the store's backend services.
///
/// Cheap to clone; clones share the transport and the token session.
#[derive(Clone)]
pub struct StoreApi {
    inner: Arc<StoreApiInner>,
}

struct StoreApiInner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    session: TokenSession,
}

impl std::fmt::Debug for StoreApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreApi")
            .field("config", &self.inner.config)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

impl StoreApi {
    /// Create a facade over an explicit transport.
    #[must_use]
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>, session: TokenSession) -> Self {
        Self {
            inner: Arc::new(StoreApiInner {
                config,
                transport,
                session,
            }),
        }
    }

    /// Create a facade using the default `reqwest` transport.
    #[must_use]
    pub fn with_reqwest(config: ClientConfig, session: TokenSession) -> Self {
        Self::new(config, Arc::new(ReqwestTransport::new()), session)
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn session(&self) -> &TokenSession {
        &self.inner.session
    }

    /// Send a request to a gateway path.
    ///
    /// `method` defaults to GET. The response, or the transport's failure, is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns whatever the transport returns for the request, or
    /// `ApiError::InvalidHeader` if the token cannot be sent as a header.
    #[instrument(skip(self, body))]
    pub async fn raw_call(
        &self,
        path: &str,
        method: Option<Method>,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.prepare_request(path, method, body).await?;
        debug!(method = %request.method, url = %request.url, "API call");
        self.inner.transport.send(request).await
    }

    /// Compose the URL and headers for a call without sending it.
    async fn prepare_request(
        &self,
        path: &str,
        method: Option<Method>,
        body: Option<Value>,
    ) -> Result<ApiRequest, ApiError> {
        let mut request = ApiRequest::new(self.inner.config.url_for(path))
            .method(method.unwrap_or_default())
            .body(body);

        if let Some(value) = self.authorization_header().await? {
            request.headers.insert(AUTHORIZATION, value);
        }

        Ok(request)
    }

    /// Bearer header for the signed-in user, if auth is configured and a token
    /// could be acquired.
    async fn authorization_header(&self) -> Result<Option<HeaderValue>, ApiError> {
        if self.inner.session.user().is_none() {
            return Ok(None);
        }
        let Some(scopes) = self.inner.config.token_scopes() else {
            return Ok(None);
        };
        let Some(token) = self.inner.session.token(&scopes).await else {
            return Ok(None);
        };

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::StatusCode;
    use secrecy::SecretString;
    use serde_json::json;

    use super::test_support::{CountingAuth, MockTransport, api_with};
    use super::*;
    use crate::auth::{Identity, StaticAuth};

    #[test]
    fn test_invoke_path() {
        assert_eq!(
            invoke_path(Service::Orders, "getForUser/alice"),
            "v1.0/invoke/orders/method/getForUser/alice"
        );
    }

    #[tokio::test]
    async fn test_default_method_is_get_and_url_uses_default_base() {
        let transport = MockTransport::new();
        let api = api_with(ClientConfig::default(), &transport, TokenSession::anonymous());

        api.raw_call("v1.0/invoke/products/method/catalog", None, None)
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "/v1.0/invoke/products/method/catalog");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_response_is_returned_unchanged() {
        let transport = MockTransport::new();
        transport.push_response(ApiResponse::json_body(
            StatusCode::CREATED,
            json!({"id": "ORD-9"}),
        ));
        let api = api_with(ClientConfig::default(), &transport, TokenSession::anonymous());

        let response = api.raw_call("x", Some(Method::POST), None).await.unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.data, json!({"id": "ORD-9"}));
        assert!(response.is_json());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = MockTransport::new();
        transport.push_error(ApiError::Status {
            request_url: Some("/x".to_string()),
            response: Box::new(ApiResponse::new(StatusCode::NOT_FOUND, json!("missing"))),
        });
        let api = api_with(ClientConfig::default(), &transport, TokenSession::anonymous());

        let err = api.raw_call("x", None, None).await.unwrap_err();
        assert_eq!(
            err.response().map(|r| r.status),
            Some(StatusCode::NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn test_no_auth_header_without_identity() {
        let transport = MockTransport::new();
        let auth = Arc::new(CountingAuth::new(None, Some("tok")));
        let api = api_with(
            ClientConfig::new("http://gw/").with_auth_client_id("client-1"),
            &transport,
            TokenSession::new(auth.clone()),
        );

        api.raw_call("x", None, None).await.unwrap();

        assert!(transport.last_request().authorization().is_none());
        assert_eq!(auth.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_auth_header_without_client_id_even_with_cached_token() {
        let auth = Arc::new(CountingAuth::new(Some("alice"), Some("tok")));
        let session = TokenSession::new(auth.clone());
        session.token(&["any".to_string()]).await.unwrap();
        assert!(session.has_token());

        let transport = MockTransport::new();
        let api = api_with(ClientConfig::new("http://gw/"), &transport, session);
        api.raw_call("x", None, None).await.unwrap();

        assert!(transport.last_request().authorization().is_none());
        assert_eq!(auth.calls(), 1);
    }

    #[tokio::test]
    async fn test_bearer_header_and_single_acquisition() {
        let transport = MockTransport::new();
        let auth = Arc::new(CountingAuth::new(Some("alice"), Some("tok-123")));
        let api = api_with(
            ClientConfig::new("http://gw/").with_auth_client_id("client-1"),
            &transport,
            TokenSession::new(auth.clone()),
        );

        api.raw_call("a", None, None).await.unwrap();
        api.raw_call("b", Some(Method::PUT), None).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            assert_eq!(request.authorization(), Some("Bearer tok-123"));
        }
        assert_eq!(auth.calls(), 1);
        assert_eq!(
            auth.last_scopes(),
            vec!["api://client-1/store-api".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_acquisition_degrades_to_unauthenticated() {
        let transport = MockTransport::new();
        let auth = Arc::new(CountingAuth::new(Some("alice"), None));
        let api = api_with(
            ClientConfig::new("http://gw/").with_auth_client_id("client-1"),
            &transport,
            TokenSession::new(auth.clone()),
        );

        api.raw_call("a", None, None).await.unwrap();
        api.raw_call("b", None, None).await.unwrap();

        assert!(transport.requests().iter().all(|r| r.authorization().is_none()));
        // Nothing cached, so each call asks again
        assert_eq!(auth.calls(), 2);
    }

    #[tokio::test]
    async fn test_token_with_invalid_header_chars_is_an_error() {
        let transport = MockTransport::new();
        let session = TokenSession::new(Arc::new(StaticAuth::new(
            Some(Identity::new("alice")),
            Some(SecretString::from("bad\ntoken")),
        )));
        let api = api_with(
            ClientConfig::new("http://gw/").with_auth_client_id("client-1"),
            &transport,
            session,
        );

        let err = api.raw_call("x", None, None).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidHeader(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_token_session() {
        let transport = MockTransport::new();
        let auth = Arc::new(CountingAuth::new(Some("alice"), Some("tok")));
        let api = api_with(
            ClientConfig::new("http://gw/").with_auth_client_id("client-1"),
            &transport,
            TokenSession::new(auth.clone()),
        );
        let other = api.clone();

        api.raw_call("a", None, None).await.unwrap();
        other.raw_call("b", None, None).await.unwrap();

        assert_eq!(auth.calls(), 1);
    }
}
