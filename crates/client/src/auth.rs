//! Bearer-token authentication for API calls.
//!
//! Token acquisition belongs to an external identity provider, reached through
//! the [`AuthProvider`] trait. [`TokenSession`] wraps a provider and caches the
//! first token it hands out for the lifetime of the session.
//!
//! # Caching
//!
//! - The first authenticated call acquires the token; later calls reuse it
//! - Concurrent first calls share a single acquisition
//! - A failed or empty acquisition caches nothing, so the next call retries
//! - The cached token is never refreshed or cleared here; expiry handling is
//!   the provider's concern

use std::sync::Arc;

use async_trait::async_trait;
use dapr_store_core::Username;
use secrecy::SecretString;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

/// Errors reported by an [`AuthProvider`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider could not issue a token.
    #[error("Token acquisition failed: {0}")]
    AcquisitionFailed(String),

    /// The provider needs user interaction (e.g. a consent prompt) first.
    #[error("Interaction required to acquire token")]
    InteractionRequired,

    /// The provider completed without returning a token.
    #[error("No access token returned")]
    NoToken,
}

/// The signed-in user, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: Username,
    pub display_name: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(username: impl Into<Username>) -> Self {
        Self {
            username: username.into(),
            display_name: None,
        }
    }
}

/// Identity provider contract.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The currently signed-in user, if any.
    fn user(&self) -> Option<Identity>;

    /// Acquire an access token for the given scopes.
    ///
    /// `Ok(None)` means the provider produced no token without failing.
    async fn acquire_token(&self, scopes: &[String]) -> Result<Option<SecretString>, AuthError>;
}

/// Provider with a fixed identity and an optional pre-issued token.
///
/// Suits command-line use and tests, where there is no interactive sign-in.
#[derive(Clone, Default)]
pub struct StaticAuth {
    identity: Option<Identity>,
    token: Option<SecretString>,
}

impl std::fmt::Debug for StaticAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAuth")
            .field("identity", &self.identity)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl StaticAuth {
    /// No signed-in user; every call goes out unauthenticated.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn new(identity: Option<Identity>, token: Option<SecretString>) -> Self {
        Self { identity, token }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    fn user(&self) -> Option<Identity> {
        self.identity.clone()
    }

    async fn acquire_token(&self, _scopes: &[String]) -> Result<Option<SecretString>, AuthError> {
        Ok(self.token.clone())
    }
}

/// Per-session token cache in front of an [`AuthProvider`].
pub struct TokenSession {
    provider: Arc<dyn AuthProvider>,
    token: OnceCell<SecretString>,
}

impl std::fmt::Debug for TokenSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSession")
            .field("token", &self.token.get().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl TokenSession {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            token: OnceCell::new(),
        }
    }

    /// A session with no signed-in user.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(Arc::new(StaticAuth::anonymous()))
    }

    /// The signed-in user, straight from the provider.
    #[must_use]
    pub fn user(&self) -> Option<Identity> {
        self.provider.user()
    }

    /// Whether a token has been cached.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.initialized()
    }

    /// The session token, acquiring it on first use.
    ///
    /// Returns `None` when acquisition fails or yields nothing; the failure is
    /// logged and not cached.
    #[instrument(skip(self))]
    pub async fn token(&self, scopes: &[String]) -> Option<SecretString> {
        let result = self
            .token
            .get_or_try_init(|| async {
                debug!("Acquiring access token");
                self.provider
                    .acquire_token(scopes)
                    .await?
                    .ok_or(AuthError::NoToken)
            })
            .await;

        match result {
            Ok(token) => Some(token.clone()),
            Err(e) => {
                warn!(error = %e, "Token acquisition failed, continuing unauthenticated");
                None
            }
        }
    }
}
