//! HTTP transport boundary.
//!
//! The facade never talks to `reqwest` directly: it builds an [`ApiRequest`]
//! and hands it to an injected [`Transport`]. [`ReqwestTransport`] is the
//! production implementation; tests substitute their own.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::ApiError;

/// A fully composed request, ready to send.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// JSON body, serialized as-is when present.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a GET request with no headers or body.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// The `Authorization` header value, if one is attached.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// A response as returned by the transport.
///
/// `data` holds the parsed body: JSON when the body parses as JSON, a JSON
/// string of the raw text otherwise, and `Null` for an empty body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub data: Value,
}

impl ApiResponse {
    /// Create a response with no headers.
    #[must_use]
    pub fn new(status: StatusCode, data: Value) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            data,
        }
    }

    /// Create a response carrying a JSON body and an `application/json` content type.
    #[must_use]
    pub fn json_body(status: StatusCode, data: Value) -> Self {
        let mut response = Self::new(status, data);
        response.headers.insert(
            CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json; charset=utf-8"),
        );
        response
    }

    /// The `Content-Type` header, if present and valid ASCII.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Whether the content type declares a JSON body.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type().is_some_and(|ct| ct.contains("json"))
    }

    /// Whether the response carries a non-empty body.
    #[must_use]
    pub fn has_data(&self) -> bool {
        match &self.data {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Deserialize the body into a typed record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Parse` if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_value(self.data.clone())?)
    }

    async fn from_reqwest(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        Ok(Self {
            status,
            headers,
            data: parse_body(&bytes),
        })
    }
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Sends composed requests to the backend.
///
/// Implementations return `Ok` only for successful (2xx) responses; anything
/// else is an [`ApiError`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Transport backed by a shared `reqwest::Client`.
///
/// Inherits the client's timeout and redirect behaviour unchanged. Relative
/// endpoints (such as the default `/`) cannot be resolved outside a browser and
/// fail with `ApiError::Http`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (timeouts, proxies, TLS).
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self
            .client
            .request(request.method, request.url.as_str())
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = ApiResponse::from_reqwest(builder.send().await?).await?;

        if response.status.is_success() {
            return Ok(response);
        }

        debug!(status = %response.status, "Backend returned non-success status");
        Err(ApiError::Status {
            request_url: Some(request.url),
            response: Box::new(response),
        })
    }
}
