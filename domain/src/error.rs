//! Error types for the `domain` layer.
use meeting_ai::Error as MeetingAiError;
use meeting_auth::error::{
    Error as MeetingAuthError, ErrorKind as MeetingAuthErrorKind, OAuthErrorKind,
};
use std::error::Error as StdError;
use std::fmt;

/// Message shown when Google refuses access, usually because the signed in account is
/// not registered as a test user of the OAuth consent screen.
pub const AUTHORIZATION_DENIED_MESSAGE: &str =
    "Please make sure you're using a test user account. Contact the developer if you need access.";

/// Message shown when stored credentials cannot be turned into a calendar client.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Failed to create calendar service";

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. Errors from `meeting_auth`, `meeting_ai` and `reqwest` are
/// translated here so that `web` never depends on those crates' error types.
/// Ultimately the various `error_kind`s are used by `web` to return appropriate
/// HTTP status codes and messages to the client.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// Missing or malformed configuration (client secrets file, API key).
    Config,
    /// The caller supplied input that can never succeed.
    Validation(String),
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    /// Google refused access for the signed in account.
    AuthorizationDenied,
    /// Stored credentials could not be turned into a calendar client.
    ServiceUnavailable,
    /// Google rejected the stored access token.
    Unauthenticated,
    /// An upstream service failed; carries the message to show the caller.
    Service(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Validation(message.into())),
        }
    }

    pub fn service(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Service(message.into())),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let base = match &self.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Validation(message))
            | DomainErrorKind::Internal(InternalErrorKind::Other(message))
            | DomainErrorKind::External(ExternalErrorKind::Service(message)) => {
                return write!(f, "{message}");
            }
            DomainErrorKind::External(ExternalErrorKind::AuthorizationDenied) => {
                return write!(f, "{AUTHORIZATION_DENIED_MESSAGE}");
            }
            DomainErrorKind::External(ExternalErrorKind::ServiceUnavailable) => {
                return write!(f, "{SERVICE_UNAVAILABLE_MESSAGE}");
            }
            DomainErrorKind::Internal(InternalErrorKind::Config) => "Configuration error",
            DomainErrorKind::External(ExternalErrorKind::Network) => "Network error",
            DomainErrorKind::External(ExternalErrorKind::Unauthenticated) => {
                "Authentication required"
            }
        };

        match &self.source {
            Some(source) => write!(f, "{base}: {source}"),
            None => write!(f, "{base}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}

impl From<MeetingAuthError> for Error {
    fn from(err: MeetingAuthError) -> Self {
        let error_kind = match &err.error_kind {
            MeetingAuthErrorKind::OAuth(OAuthErrorKind::AccessDenied) => {
                DomainErrorKind::External(ExternalErrorKind::AuthorizationDenied)
            }
            MeetingAuthErrorKind::OAuth(OAuthErrorKind::Network) => {
                DomainErrorKind::External(ExternalErrorKind::Network)
            }
            MeetingAuthErrorKind::OAuth(_) => {
                DomainErrorKind::External(ExternalErrorKind::Service(err.to_string()))
            }
            MeetingAuthErrorKind::Credential(_) | MeetingAuthErrorKind::ApiKey(_) => {
                DomainErrorKind::Internal(InternalErrorKind::Config)
            }
            MeetingAuthErrorKind::Token(_) => {
                DomainErrorKind::Internal(InternalErrorKind::Other(err.to_string()))
            }
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<MeetingAiError> for Error {
    fn from(err: MeetingAiError) -> Self {
        let error_kind = match &err {
            MeetingAiError::Configuration(_) => DomainErrorKind::Internal(InternalErrorKind::Config),
            MeetingAiError::Network(_) | MeetingAiError::Timeout(_) => {
                DomainErrorKind::External(ExternalErrorKind::Network)
            }
            _ => DomainErrorKind::External(ExternalErrorKind::Service(err.to_string())),
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}
