//! Standard Bearer token authentication.

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

use super::{ApiKeyProvider, ProviderAuth};
use crate::error::{api_key_error, ApiKeyErrorKind, Error};

/// Standard Bearer token authentication.
///
/// Uses the standard `Authorization: Bearer <token>` header pattern. The header is
/// marked sensitive so it never shows up in debug output of the request.
pub struct BearerTokenAuth {
    provider: ApiKeyProvider,
    token: SecretString,
}

impl BearerTokenAuth {
    /// Create a new Bearer token authenticator.
    pub fn new(provider: ApiKeyProvider, token: SecretString) -> Self {
        Self { provider, token }
    }

    /// Create an authenticator from an optional, possibly blank configuration value.
    ///
    /// Fails with `ApiKeyErrorKind::NotFound` when no key is configured and with
    /// `ApiKeyErrorKind::InvalidFormat` when the key cannot be sent as a header value.
    pub fn try_from_config(provider: ApiKeyProvider, token: Option<&str>) -> Result<Self, Error> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                api_key_error(
                    ApiKeyErrorKind::NotFound,
                    &format!("No API key configured for {}", provider.as_str()),
                )
            })?;

        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            api_key_error(
                ApiKeyErrorKind::InvalidFormat,
                &format!("API key for {} is not a valid header value", provider.as_str()),
            )
        })?;

        Ok(Self::new(provider, SecretString::new(token.to_string())))
    }
}

impl ProviderAuth for BearerTokenAuth {
    fn provider(&self) -> ApiKeyProvider {
        self.provider
    }

    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        match HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret())) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.header(AUTHORIZATION, value)
            }
            // Surfaces as a builder error when the request is sent.
            Err(_) => request.bearer_auth(self.token.expose_secret()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_auth_creation() {
        let token = SecretString::new("test_token".to_string());
        let auth = BearerTokenAuth::new(ApiKeyProvider::HuggingFace, token);

        assert_eq!(auth.provider(), ApiKeyProvider::HuggingFace);
    }

    #[test]
    fn test_try_from_config_missing_key() {
        let result = BearerTokenAuth::try_from_config(ApiKeyProvider::HuggingFace, None);
        let err = result.err().expect("missing key should fail");
        assert_eq!(
            err.error_kind,
            crate::ErrorKind::ApiKey(ApiKeyErrorKind::NotFound)
        );
    }

    #[test]
    fn test_try_from_config_blank_key() {
        let result = BearerTokenAuth::try_from_config(ApiKeyProvider::HuggingFace, Some("   "));
        assert!(result.is_err());
    }

    #[test]
    fn test_try_from_config_rejects_invalid_header_value() {
        let result =
            BearerTokenAuth::try_from_config(ApiKeyProvider::HuggingFace, Some("hf_\nabc"));
        let err = result.err().expect("newline in key should fail");
        assert_eq!(
            err.error_kind,
            crate::ErrorKind::ApiKey(ApiKeyErrorKind::InvalidFormat)
        );
    }

    #[test]
    fn test_authenticate_sets_bearer_header() {
        let auth = BearerTokenAuth::try_from_config(ApiKeyProvider::HuggingFace, Some("hf_abc"))
            .unwrap();
        let request = auth
            .authenticate(reqwest::Client::new().post("http://localhost/model"))
            .build()
            .unwrap();

        let header = request.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer hf_abc");
        assert!(header.is_sensitive());
    }
}
