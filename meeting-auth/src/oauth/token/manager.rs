//! Token manager with refresh locking.

use secrecy::ExposeSecret;
use tokio::sync::Mutex;
use tracing::debug;

use super::{CredentialSet, Storage};
use crate::error::{token_error, Error, TokenErrorKind};
use crate::oauth::Provider;

/// Token manager that coordinates credential retrieval and refresh.
///
/// Refreshes are serialized by a single lock. Without it, two requests that both
/// see an expired token would both refresh, and the later store would silently
/// overwrite the earlier one.
pub struct Manager<S: Storage> {
    storage: S,
    refresh_lock: Mutex<()>,
}

impl<S: Storage> Manager<S> {
    /// Create a new token manager with the given storage backend.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Get credentials with a usable access token, refreshing if needed.
    ///
    /// This method:
    /// 1. Retrieves the stored credentials
    /// 2. Checks if the access token is expired
    /// 3. If expired, refreshes the token (with locking to prevent races)
    /// 4. Stores and returns the refreshed credentials
    pub async fn get_valid_credentials<P: Provider>(
        &self,
        provider: &P,
    ) -> Result<CredentialSet, Error> {
        let credentials = self
            .storage
            .get()
            .await?
            .ok_or_else(|| token_error(TokenErrorKind::NotFound, "No credentials stored"))?;

        if !credentials.is_expired() {
            return Ok(credentials);
        }

        debug!(
            "{} access token expired, refreshing",
            provider.provider().as_str()
        );

        let _guard = self.refresh_lock.lock().await;

        // Another request may have refreshed while we waited for the lock
        let credentials = self.storage.get().await?.ok_or_else(|| {
            token_error(TokenErrorKind::NotFound, "Credentials disappeared during refresh")
        })?;

        if !credentials.is_expired() {
            debug!("Token was refreshed by another request");
            return Ok(credentials);
        }

        let refresh_token = credentials
            .refresh_token
            .as_ref()
            .ok_or_else(|| token_error(TokenErrorKind::Refresh, "No refresh token available"))?;

        let tokens = provider
            .refresh_token(refresh_token.expose_secret())
            .await
            .map_err(|e| {
                token_error(
                    TokenErrorKind::Refresh,
                    &format!("Token refresh failed: {}", e),
                )
            })?;

        let refreshed = credentials.with_refreshed(tokens);
        self.storage.store(refreshed.clone()).await?;

        debug!("Token refreshed successfully");

        Ok(refreshed)
    }

    /// Store credentials, replacing any previous ones.
    pub async fn store_credentials(&self, credentials: CredentialSet) -> Result<(), Error> {
        self.storage.store(credentials).await
    }

    /// Delete the stored credentials.
    pub async fn clear_credentials(&self) -> Result<(), Error> {
        self.storage.clear().await
    }

    /// Get the stored credentials (may be expired).
    pub async fn get_credentials(&self) -> Result<Option<CredentialSet>, Error> {
        self.storage.get().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth::token::{InMemoryStorage, Tokens};
    use crate::oauth::{AuthorizationRequest, ProviderKind};
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use secrecy::SecretString;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        refreshes: AtomicUsize,
        fail: bool,
    }

    impl CountingProvider {
        fn new(fail: bool) -> Self {
            Self {
                refreshes: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl Provider for CountingProvider {
        fn provider(&self) -> ProviderKind {
            ProviderKind::Google
        }

        fn authorization_url(&self) -> Result<AuthorizationRequest, Error> {
            Ok(AuthorizationRequest {
                url: "https://accounts.example.com/auth".to_string(),
            })
        }

        async fn exchange_code(&self, _code: &str) -> Result<Tokens, Error> {
            unreachable!("not used by the manager")
        }

        async fn refresh_token(&self, refresh_token: &str) -> Result<Tokens, Error> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            assert_eq!(refresh_token, "refresh");
            if self.fail {
                return Err(crate::error::oauth_error(
                    crate::error::OAuthErrorKind::TokenRefreshFailed,
                    "invalid_grant",
                ));
            }
            Ok(Tokens {
                access_token: SecretString::new("refreshed".to_string()),
                refresh_token: None,
                expires_at: Some(Utc::now() + Duration::hours(1)),
                scopes: vec![],
            })
        }
    }

    fn credentials(expires_at: chrono::DateTime<Utc>, refresh: Option<&str>) -> CredentialSet {
        CredentialSet {
            token: SecretString::new("access".to_string()),
            refresh_token: refresh.map(|r| SecretString::new(r.to_string())),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            client_id: "id".to_string(),
            client_secret: SecretString::new("secret".to_string()),
            scopes: vec!["scope".to_string()],
            expires_at: Some(expires_at),
        }
    }

    #[tokio::test]
    async fn test_store_and_get_credentials() {
        let manager = Manager::new(InMemoryStorage::new());
        manager
            .store_credentials(credentials(Utc::now() + Duration::hours(1), None))
            .await
            .unwrap();

        let retrieved = manager.get_credentials().await.unwrap();
        assert!(retrieved.is_some());
    }

    #[tokio::test]
    async fn test_clear_credentials() {
        let manager = Manager::new(InMemoryStorage::new());
        manager
            .store_credentials(credentials(Utc::now() + Duration::hours(1), None))
            .await
            .unwrap();

        manager.clear_credentials().await.unwrap();

        assert!(manager.get_credentials().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_valid_token_is_not_refreshed() {
        let manager = Manager::new(InMemoryStorage::new());
        let provider = CountingProvider::new(false);
        manager
            .store_credentials(credentials(Utc::now() + Duration::hours(1), Some("refresh")))
            .await
            .unwrap();

        let creds = manager.get_valid_credentials(&provider).await.unwrap();

        assert_eq!(creds.token.expose_secret(), "access");
        assert_eq!(provider.refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_and_stored() {
        let manager = Manager::new(InMemoryStorage::new());
        let provider = CountingProvider::new(false);
        manager
            .store_credentials(credentials(Utc::now() - Duration::hours(1), Some("refresh")))
            .await
            .unwrap();

        let creds = manager.get_valid_credentials(&provider).await.unwrap();
        assert_eq!(creds.token.expose_secret(), "refreshed");
        assert_eq!(creds.refresh_token.unwrap().expose_secret(), "refresh");

        let stored = manager.get_credentials().await.unwrap().unwrap();
        assert_eq!(stored.token.expose_secret(), "refreshed");
        assert_eq!(provider.refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_token_fails() {
        let manager = Manager::new(InMemoryStorage::new());
        let provider = CountingProvider::new(false);
        manager
            .store_credentials(credentials(Utc::now() - Duration::hours(1), None))
            .await
            .unwrap();

        let err = manager.get_valid_credentials(&provider).await.unwrap_err();
        assert_eq!(
            err.error_kind,
            crate::ErrorKind::Token(TokenErrorKind::Refresh)
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stored_credentials() {
        let manager = Manager::new(InMemoryStorage::new());
        let provider = CountingProvider::new(true);
        manager
            .store_credentials(credentials(Utc::now() - Duration::hours(1), Some("refresh")))
            .await
            .unwrap();

        assert!(manager.get_valid_credentials(&provider).await.is_err());

        let stored = manager.get_credentials().await.unwrap().unwrap();
        assert_eq!(stored.token.expose_secret(), "access");
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let manager = Manager::new(InMemoryStorage::new());
        let provider = CountingProvider::new(false);

        let err = manager.get_valid_credentials(&provider).await.unwrap_err();
        assert_eq!(
            err.error_kind,
            crate::ErrorKind::Token(TokenErrorKind::NotFound)
        );
    }
}
