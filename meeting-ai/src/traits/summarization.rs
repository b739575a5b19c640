//! Summarization provider trait.

use crate::types::summarization::Config;
use crate::Error;
use async_trait::async_trait;

/// Abstraction for hosted text-summarization models.
///
/// Implementations forward a transcript to a model endpoint and return the
/// generated summary text, already trimmed of surrounding whitespace.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Summarize the transcript in `config.inputs`.
    ///
    /// Fails with `Error::Provider` when the host answers with a non-success status
    /// (the message carries the status and the raw body) and with
    /// `Error::Deserialization` when the body is not a list of summaries.
    async fn summarize(&self, config: Config) -> std::result::Result<String, Error>;

    /// Return unique identifier for this provider (e.g., "hugging_face").
    fn provider_id(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_returns_configured_summary() {
        let mut provider = MockProvider::new();
        provider
            .expect_summarize()
            .withf(|config| config.inputs == "transcript")
            .times(1)
            .returning(|_| Ok("summary".to_string()));

        let summary = provider.summarize(Config::new("transcript")).await.unwrap();
        assert_eq!(summary, "summary");
    }
}
