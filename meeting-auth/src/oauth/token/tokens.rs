//! OAuth token types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::credentials::{ClientSecrets, DEFAULT_AUTH_URI};

/// OAuth tokens with metadata, as returned by a token endpoint.
#[derive(Debug, Clone)]
pub struct Tokens {
    /// Access token for API requests.
    pub access_token: SecretString,
    /// Refresh token for obtaining new access tokens.
    pub refresh_token: Option<SecretString>,
    /// When the access token expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// Granted scopes.
    pub scopes: Vec<String>,
}

/// The credential set kept after a completed authorization.
///
/// Carries everything needed to call the provider and to refresh the access
/// token later without reading the client secrets file again.
#[derive(Debug, Clone)]
pub struct CredentialSet {
    pub token: SecretString,
    pub refresh_token: Option<SecretString>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub scopes: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Access tokens are treated as expired this long before their actual expiry.
fn expiry_buffer() -> chrono::Duration {
    chrono::Duration::minutes(5)
}

impl CredentialSet {
    /// Build a credential set from freshly exchanged tokens and the client that obtained them.
    pub fn from_tokens(tokens: Tokens, secrets: &ClientSecrets) -> Self {
        Self {
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_uri: secrets.token_uri.clone(),
            client_id: secrets.client_id.clone(),
            client_secret: secrets.client_secret.clone(),
            scopes: tokens.scopes,
            expires_at: tokens.expires_at,
        }
    }

    /// Apply the result of a refresh. The previous refresh token is kept when the
    /// provider does not issue a new one.
    pub fn with_refreshed(self, tokens: Tokens) -> Self {
        let scopes = if tokens.scopes.is_empty() {
            self.scopes
        } else {
            tokens.scopes
        };

        Self {
            token: tokens.access_token,
            refresh_token: tokens.refresh_token.or(self.refresh_token),
            expires_at: tokens.expires_at,
            scopes,
            ..self
        }
    }

    /// Client secrets equivalent to the ones this set was issued to.
    pub fn client_secrets(&self) -> ClientSecrets {
        ClientSecrets {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            auth_uri: DEFAULT_AUTH_URI.to_string(),
            token_uri: self.token_uri.clone(),
            redirect_uris: Vec::new(),
        }
    }

    /// Check if the access token is expired or about to expire soon.
    ///
    /// Returns true if the token is expired or will expire within 5 minutes.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires| expires <= (Utc::now() + expiry_buffer()))
            .unwrap_or(false)
    }
}
