//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `API_ENDPOINT` - Base URL prepended to every gateway path (default: `/`)
//! - `AUTH_CLIENT_ID` - Application client ID; enables bearer-token auth when set
//! - `API_SCOPE` - Scope name requested for the API (default: `store-api`)

use thiserror::Error;

const DEFAULT_API_ENDPOINT: &str = "/";
const DEFAULT_API_SCOPE: &str = "store-api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base endpoint, joined to gateway paths by plain concatenation
    pub api_endpoint: String,
    /// Application client ID registered with the identity provider
    pub auth_client_id: Option<String>,
    /// Scope name exposed by the API application
    pub api_scope: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            auth_client_id: None,
            api_scope: DEFAULT_API_SCOPE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given base endpoint with auth disabled.
    ///
    /// An empty endpoint falls back to `/`.
    #[must_use]
    pub fn new(api_endpoint: impl Into<String>) -> Self {
        let api_endpoint = api_endpoint.into();
        Self {
            api_endpoint: if api_endpoint.is_empty() {
                DEFAULT_API_ENDPOINT.to_string()
            } else {
                api_endpoint
            },
            ..Self::default()
        }
    }

    /// Enable bearer-token auth for the given application client ID.
    #[must_use]
    pub fn with_auth_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.auth_client_id = Some(client_id.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `API_SCOPE` is not a single path segment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let api_scope = get("API_SCOPE").unwrap_or_else(|| DEFAULT_API_SCOPE.to_string());
        if api_scope.contains('/') || api_scope.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidEnvVar(
                "API_SCOPE".to_string(),
                format!("'{api_scope}' must be a single scope name"),
            ));
        }

        Ok(Self {
            api_endpoint: get("API_ENDPOINT").unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            auth_client_id: get("AUTH_CLIENT_ID"),
            api_scope,
        })
    }

    /// Whether bearer-token auth is configured.
    #[must_use]
    pub const fn auth_enabled(&self) -> bool {
        self.auth_client_id.is_some()
    }

    /// Scopes to request from the identity provider, if auth is configured.
    #[must_use]
    pub fn token_scopes(&self) -> Option<Vec<String>> {
        self.auth_client_id
            .as_ref()
            .map(|client_id| vec![format!("api://{client_id}/{}", self.api_scope)])
    }

    /// Full request URL for a gateway path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.api_endpoint)
    }
}
