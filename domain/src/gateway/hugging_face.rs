//! Hugging Face Inference API client for transcript summarization.
//!
//! Implements `meeting_ai::traits::summarization::Provider` on top of a hosted
//! summarization pipeline (by default `facebook/bart-large-cnn`).

use async_trait::async_trait;
use log::*;
use meeting_ai::traits::summarization::Provider;
use meeting_ai::types::summarization::{Config, Summary};
use meeting_ai::Error;
use meeting_auth::api_key::{ApiKeyProvider, BearerTokenAuth, ProviderAuth};
use secrecy::{ExposeSecret, SecretString};

/// Hugging Face Inference API client
pub struct Client {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<SecretString>,
}

impl Client {
    /// Create a client for `api_url`.
    ///
    /// A missing key is accepted here and reported on each summarization request,
    /// so the rest of the API keeps working without one.
    pub fn new(api_url: &str, api_key: Option<String>) -> Result<Self, crate::error::Error> {
        if api_key.is_none() {
            warn!("HUGGINGFACE_API_KEY is not set, summary generation will fail");
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.map(SecretString::new),
        })
    }

    fn auth(&self) -> Result<BearerTokenAuth, Error> {
        BearerTokenAuth::try_from_config(
            ApiKeyProvider::HuggingFace,
            self.api_key.as_ref().map(|key| key.expose_secret().as_str()),
        )
        .map_err(|e| Error::Configuration(e.to_string()))
    }
}

/// Pull the first summary out of a pipeline response body.
fn parse_summary(body: &str) -> Result<String, Error> {
    let summaries: Vec<Summary> = serde_json::from_str(body).map_err(|e| {
        Error::Deserialization(format!("Unexpected response format: {e}. Response: {body}"))
    })?;

    summaries
        .into_iter()
        .next()
        .map(|summary| summary.summary_text.trim().to_string())
        .ok_or_else(|| {
            Error::Deserialization(format!("Response contained no summaries. Response: {body}"))
        })
}

#[async_trait]
impl Provider for Client {
    async fn summarize(&self, config: Config) -> Result<String, Error> {
        let auth = self.auth()?;

        debug!(
            "Requesting {} summary for a transcript of {} characters",
            auth.provider().as_str(),
            config.inputs.len()
        );

        let response = auth
            .authenticate(self.client.post(&self.api_url))
            .json(&config)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach Hugging Face: {:?}", e);
                if e.is_timeout() {
                    Error::Timeout(e.to_string())
                } else {
                    Error::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("Hugging Face API error ({}): {}", status, body);
            return Err(Error::Provider(format!(
                "Hugging Face API Error (Status {}): {}",
                status.as_u16(),
                body
            )));
        }

        let summary = parse_summary(&body)?;
        info!("Generated summary of {} characters", summary.len());
        Ok(summary)
    }

    fn provider_id(&self) -> &'static str {
        ApiKeyProvider::HuggingFace.as_str()
    }
}
