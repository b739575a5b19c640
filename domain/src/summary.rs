//! Transcript summarization.

use crate::error::Error;
use log::*;
use meeting_ai::traits::summarization::Provider;
use meeting_ai::types::summarization::Config;

pub const EMPTY_TRANSCRIPT_MESSAGE: &str = "Transcript cannot be empty";

/// Summarize `transcript` with `provider`. An empty transcript is rejected without
/// contacting the provider.
pub async fn generate(provider: &dyn Provider, transcript: &str) -> Result<String, Error> {
    if transcript.is_empty() {
        return Err(Error::validation(EMPTY_TRANSCRIPT_MESSAGE));
    }

    provider
        .summarize(Config::new(transcript))
        .await
        .map_err(|e| {
            warn!("Summarization with {} failed: {}", provider.provider_id(), e);
            match e {
                meeting_ai::Error::Configuration(_) => Error::from(e),
                _ => {
                    let mut err = Error::service(format!("Failed to generate summary: {e}"));
                    err.source = Some(Box::new(e));
                    err
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ExternalErrorKind, InternalErrorKind};
    use meeting_ai::traits::summarization::MockProvider;

    #[tokio::test]
    async fn test_empty_transcript_never_reaches_provider() {
        let mut provider = MockProvider::new();
        provider.expect_summarize().times(0);
        provider.expect_provider_id().return_const("mock");

        let err = generate(&provider, "").await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Validation(
                EMPTY_TRANSCRIPT_MESSAGE.to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_whitespace_transcript_is_sent_to_provider() {
        let mut provider = MockProvider::new();
        provider
            .expect_summarize()
            .withf(|config| config.inputs == "   ")
            .times(1)
            .returning(|_| Ok(String::new()));

        let summary = generate(&provider, "   ").await.unwrap();
        assert_eq!(summary, "");
    }

    #[tokio::test]
    async fn test_generate_returns_provider_summary() {
        let mut provider = MockProvider::new();
        provider
            .expect_summarize()
            .withf(|config| config.inputs == "Alice: ship Friday." && config.parameters.max_length == 300)
            .times(1)
            .returning(|_| Ok("Ship on Friday.".to_string()));

        let summary = generate(&provider, "Alice: ship Friday.").await.unwrap();
        assert_eq!(summary, "Ship on Friday.");
    }

    #[tokio::test]
    async fn test_provider_failure_is_service_error() {
        let mut provider = MockProvider::new();
        provider.expect_summarize().times(1).returning(|_| {
            Err(meeting_ai::Error::Provider(
                "Hugging Face API Error (Status 500): boom".to_string(),
            ))
        });
        provider.expect_provider_id().return_const("mock");

        let err = generate(&provider, "text").await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Service(
                "Failed to generate summary: Hugging Face API Error (Status 500): boom"
                    .to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let mut provider = MockProvider::new();
        provider
            .expect_summarize()
            .returning(|_| Err(meeting_ai::Error::Configuration("no key".to_string())));
        provider.expect_provider_id().return_const("mock");

        let err = generate(&provider, "text").await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config)
        );
    }
}
