//! Credential providers for the API client.
//!
//! The client never reads tokens from ambient storage; a provider is handed
//! to [`ApiClient`](crate::api::ApiClient) at construction and asked for the
//! bearer token on every request.

use parking_lot::RwLock;
use tracing::debug;

/// Supplies the bearer token attached to backend requests.
pub trait CredentialProvider: Send + Sync {
    /// Current token, or `None` for anonymous requests.
    fn bearer_token(&self) -> Option<String>;

    /// Called when the backend answers 401.
    fn on_unauthorized(&self) {}
}

/// Anonymous access.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, e.g. from `PHYSIO_API_TOKEN`.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"<redacted>").finish()
    }
}

/// Session token set at login and dropped at logout or on a 401.
#[derive(Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token returned by a successful login.
    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }
}

impl CredentialProvider for TokenStore {
    fn bearer_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn on_unauthorized(&self) {
        if self.token.write().take().is_some() {
            debug!("session token rejected by backend, cleared");
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_store_lifecycle() {
        let store = TokenStore::new();
        assert_eq!(store.bearer_token(), None);

        store.set("abc");
        assert_eq!(store.bearer_token(), Some("abc".to_string()));
        assert!(store.is_authenticated());

        store.on_unauthorized();
        assert_eq!(store.bearer_token(), None);
    }

    #[test]
    fn test_static_token_debug_is_redacted() {
        let token = StaticToken::new("secret-value");
        assert!(!format!("{token:?}").contains("secret-value"));
        assert_eq!(token.bearer_token(), Some("secret-value".to_string()));
    }
}
