//! OAuth provider trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::token::Tokens;
use crate::error::Error;

/// Known OAuth providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Google,
}

impl ProviderKind {
    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
        }
    }
}

/// Authorization request with the URL the user must be sent to.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Authorization URL to redirect the user to.
    pub url: String,
}

/// Trait for OAuth 2.0 providers.
///
/// Implementations handle platform-specific OAuth flows including:
/// - Authorization URL generation
/// - Authorization code exchange for tokens
/// - Token refresh
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider kind.
    fn provider(&self) -> ProviderKind;

    /// Generate the consent URL for this provider.
    fn authorization_url(&self) -> Result<AuthorizationRequest, Error>;

    /// Exchange authorization code for access and refresh tokens.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code from OAuth callback
    ///
    /// # Returns
    ///
    /// OAuth tokens including access token, refresh token, and expiry.
    /// Fails with `OAuthErrorKind::AccessDenied` when the user declined consent.
    async fn exchange_code(&self, code: &str) -> Result<Tokens, Error>;

    /// Refresh an access token using a refresh token.
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - The refresh token
    ///
    /// # Returns
    ///
    /// Fresh tokens. Providers that do not rotate refresh tokens leave
    /// `refresh_token` empty.
    async fn refresh_token(&self, refresh_token: &str) -> Result<Tokens, Error>;
}
