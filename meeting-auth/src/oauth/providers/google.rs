//! Google OAuth provider implementation.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::credentials::ClientSecrets;
use crate::error::{oauth_error, Error, OAuthErrorKind};
use crate::oauth::token::Tokens;
use crate::oauth::{AuthorizationRequest, ProviderKind};

/// Scope granting read/write access to the user's calendars.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Error code Google reports when the user declines consent.
const ACCESS_DENIED: &str = "access_denied";

/// Token endpoint success response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
}

/// Token endpoint error response (RFC 6749 section 5.2).
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Request to exchange authorization code for tokens
#[derive(Serialize)]
struct TokenExchangeRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'static str,
}

/// Request to refresh access token
#[derive(Serialize)]
struct TokenRefreshRequest<'a> {
    refresh_token: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'static str,
}

/// Google OAuth provider.
///
/// Handles OAuth 2.0 flows for Google accounts, including:
/// - Consent URL generation (offline access, forced consent screen)
/// - Authorization code exchange
/// - Token refresh
pub struct Provider {
    secrets: ClientSecrets,
    scopes: Vec<String>,
    redirect_uri: String,
    http_client: reqwest::Client,
}

impl Provider {
    /// Create a new Google OAuth provider.
    ///
    /// # Arguments
    ///
    /// * `secrets` - Client credentials loaded from the client secrets file
    /// * `scopes` - Scopes to request
    /// * `redirect_uri` - OAuth redirect URI registered for the client
    pub fn new(secrets: ClientSecrets, scopes: Vec<String>, redirect_uri: String) -> Self {
        Self {
            secrets,
            scopes,
            redirect_uri,
            http_client: reqwest::Client::new(),
        }
    }

    /// The client credentials this provider authenticates with.
    pub fn secrets(&self) -> &ClientSecrets {
        &self.secrets
    }

    async fn request_tokens<T: Serialize>(
        &self,
        form: &T,
        failure_kind: OAuthErrorKind,
    ) -> Result<TokenResponse, Error> {
        let response = self
            .http_client
            .post(&self.secrets.token_uri)
            .form(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach Google token endpoint: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: crate::ErrorKind::OAuth(OAuthErrorKind::Network),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read Google token response: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: crate::ErrorKind::OAuth(OAuthErrorKind::Network),
            }
        })?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                warn!("Failed to parse Google token response: {:?}", e);
                oauth_error(
                    OAuthErrorKind::InvalidResponse,
                    &format!("Invalid response from Google OAuth: {}", e),
                )
            })
        } else {
            warn!("Google OAuth error ({}): {}", status, body);
            Err(classify_token_error(&body, failure_kind))
        }
    }

    fn to_tokens(&self, response: TokenResponse) -> Tokens {
        let scopes = match response.scope {
            Some(scope) if !scope.trim().is_empty() => {
                scope.split_whitespace().map(str::to_string).collect()
            }
            _ => self.scopes.clone(),
        };

        Tokens {
            access_token: SecretString::new(response.access_token),
            refresh_token: response
                .refresh_token
                .filter(|t| !t.is_empty())
                .map(SecretString::new),
            expires_at: response
                .expires_in
                .filter(|secs| *secs > 0)
                .map(|secs| Utc::now() + Duration::seconds(secs)),
            scopes,
        }
    }
}

/// Map a token endpoint error body to a typed error. A declined consent becomes
/// `AccessDenied`; everything else keeps the provider's code and description.
fn classify_token_error(body: &str, failure_kind: OAuthErrorKind) -> Error {
    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(err) if err.error == ACCESS_DENIED => {
            oauth_error(OAuthErrorKind::AccessDenied, "The user denied access")
        }
        Ok(err) => {
            let message = match err.error_description {
                Some(description) => format!("{}: {}", err.error, description),
                None => err.error,
            };
            oauth_error(failure_kind, &message)
        }
        Err(_) => oauth_error(failure_kind, body),
    }
}

/// Map the `error` parameter of an authorization callback to a typed error.
pub fn callback_error(error: &str) -> Error {
    if error == ACCESS_DENIED {
        oauth_error(OAuthErrorKind::AccessDenied, "The user denied access")
    } else {
        oauth_error(OAuthErrorKind::AuthorizationFailed, error)
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Google
    }

    fn authorization_url(&self) -> Result<AuthorizationRequest, Error> {
        let mut url = Url::parse(&self.secrets.auth_uri).map_err(|e| {
            oauth_error(
                OAuthErrorKind::AuthorizationFailed,
                &format!("Invalid auth_uri {}: {}", self.secrets.auth_uri, e),
            )
        })?;

        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.secrets.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("access_type", "offline")
            .append_pair("include_granted_scopes", "true")
            .append_pair("prompt", "consent");

        Ok(AuthorizationRequest { url: url.into() })
    }

    async fn exchange_code(&self, code: &str) -> Result<Tokens, Error> {
        let request = TokenExchangeRequest {
            code,
            client_id: &self.secrets.client_id,
            client_secret: self.secrets.client_secret.expose_secret(),
            redirect_uri: &self.redirect_uri,
            grant_type: "authorization_code",
        };

        debug!("Exchanging Google OAuth code for tokens");

        let response = self
            .request_tokens(&request, OAuthErrorKind::TokenExchangeFailed)
            .await?;

        info!("Successfully exchanged Google OAuth code for tokens");
        Ok(self.to_tokens(response))
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<Tokens, Error> {
        let request = TokenRefreshRequest {
            refresh_token,
            client_id: &self.secrets.client_id,
            client_secret: self.secrets.client_secret.expose_secret(),
            grant_type: "refresh_token",
        };

        debug!("Refreshing Google access token");

        let response = self
            .request_tokens(&request, OAuthErrorKind::TokenRefreshFailed)
            .await?;

        info!("Successfully refreshed Google access token");
        Ok(self.to_tokens(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth::Provider as _;
    use crate::ErrorKind;
    use mockito::{Matcher, Server};

    fn provider(token_uri: &str) -> Provider {
        let secrets = ClientSecrets::from_json(&format!(
            r#"{{"web": {{
                "client_id": "client-123",
                "client_secret": "secret-456",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "{token_uri}"
            }}}}"#
        ))
        .unwrap();

        Provider::new(
            secrets,
            vec![CALENDAR_SCOPE.to_string()],
            "http://localhost:8000/oauth2callback".to_string(),
        )
    }

    #[test]
    fn test_authorization_url_requests_offline_access_and_consent() {
        let request = provider("https://oauth2.googleapis.com/token")
            .authorization_url()
            .unwrap();
        let url = Url::parse(&request.url).unwrap();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(params["redirect_uri"], "http://localhost:8000/oauth2callback");
        assert_eq!(params["scope"], CALENDAR_SCOPE);
        assert_eq!(params["access_type"], "offline");
        assert_eq!(params["include_granted_scopes"], "true");
        assert_eq!(params["prompt"], "consent");
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".into(), "auth-code".into()),
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("client_id".into(), "client-123".into()),
                Matcher::UrlEncoded("client_secret".into(), "secret-456".into()),
                Matcher::UrlEncoded(
                    "redirect_uri".into(),
                    "http://localhost:8000/oauth2callback".into(),
                ),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token": "ya29.token", "refresh_token": "1//refresh",
                    "expires_in": 3599, "token_type": "Bearer",
                    "scope": "https://www.googleapis.com/auth/calendar"}"#,
            )
            .create_async()
            .await;

        let tokens = provider(&format!("{}/token", server.url()))
            .exchange_code("auth-code")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(tokens.access_token.expose_secret(), "ya29.token");
        assert_eq!(tokens.refresh_token.unwrap().expose_secret(), "1//refresh");
        assert_eq!(tokens.scopes, vec![CALENDAR_SCOPE.to_string()]);
        assert!(tokens.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_exchange_code_access_denied() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error": "access_denied", "error_description": "User denied"}"#)
            .create_async()
            .await;

        let err = provider(&format!("{}/token", server.url()))
            .exchange_code("auth-code")
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::OAuth(OAuthErrorKind::AccessDenied));
    }

    #[tokio::test]
    async fn test_exchange_code_invalid_grant_keeps_description() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error": "invalid_grant", "error_description": "Bad Request"}"#)
            .create_async()
            .await;

        let err = provider(&format!("{}/token", server.url()))
            .exchange_code("expired-code")
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed)
        );
        assert!(err.to_string().contains("invalid_grant: Bad Request"));
    }

    #[tokio::test]
    async fn test_exchange_code_malformed_success_body() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = provider(&format!("{}/token", server.url()))
            .exchange_code("auth-code")
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::InvalidResponse)
        );
    }

    #[tokio::test]
    async fn test_refresh_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
                Matcher::UrlEncoded("refresh_token".into(), "1//refresh".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"access_token": "ya29.new", "expires_in": 3599}"#)
            .create_async()
            .await;

        let tokens = provider(&format!("{}/token", server.url()))
            .refresh_token("1//refresh")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(tokens.access_token.expose_secret(), "ya29.new");
        assert!(tokens.refresh_token.is_none());
    }

    #[test]
    fn test_callback_error_mapping() {
        assert_eq!(
            callback_error("access_denied").error_kind,
            ErrorKind::OAuth(OAuthErrorKind::AccessDenied)
        );
        assert_eq!(
            callback_error("invalid_scope").error_kind,
            ErrorKind::OAuth(OAuthErrorKind::AuthorizationFailed)
        );
    }
}
