//! Test doubles for the facade: a recording transport and a counting provider.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::Value;

use super::StoreApi;
use crate::auth::{AuthError, AuthProvider, Identity, TokenSession};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Records every request and replays queued responses in order.
///
/// With nothing queued, answers `200 OK` with an empty body.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    requests: Vec<ApiRequest>,
    responses: VecDeque<Result<ApiResponse, ApiError>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_response(&self, response: ApiResponse) {
        self.state.lock().unwrap().responses.push_back(Ok(response));
    }

    pub(crate) fn push_error(&self, error: ApiError) {
        self.state.lock().unwrap().responses.push_back(Err(error));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub(crate) fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request);
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(StatusCode::OK, Value::Null)))
    }
}

/// Provider that counts acquisitions and remembers the requested scopes.
pub(crate) struct CountingAuth {
    identity: Option<Identity>,
    token: Option<String>,
    calls: AtomicUsize,
    last_scopes: Mutex<Vec<String>>,
}

impl CountingAuth {
    pub(crate) fn new(username: Option<&str>, token: Option<&str>) -> Self {
        Self {
            identity: username.map(Identity::new),
            token: token.map(String::from),
            calls: AtomicUsize::new(0),
            last_scopes: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_scopes(&self) -> Vec<String> {
        self.last_scopes.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthProvider for CountingAuth {
    fn user(&self) -> Option<Identity> {
        self.identity.clone()
    }

    async fn acquire_token(&self, scopes: &[String]) -> Result<Option<SecretString>, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_scopes.lock().unwrap() = scopes.to_vec();
        Ok(self.token.clone().map(SecretString::from))
    }
}

/// Facade wired to a clone of the given mock transport.
pub(crate) fn api_with(
    config: ClientConfig,
    transport: &MockTransport,
    session: TokenSession,
) -> StoreApi {
    StoreApi::new(config, Arc::new(transport.clone()), session)
}
