//! Loading of Google OAuth client secrets files.
//!
//! The file is the one downloaded from the Google Cloud console. It holds a single
//! top-level object, `web` or `installed`, with the client id and secret, the
//! authorization and token endpoints, and the registered redirect URIs.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use tracing::debug;

use crate::error::{credential_error, CredentialErrorKind, Error};

pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth client credentials for a registered Google application.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: SecretString,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

#[derive(Deserialize)]
struct ClientSecretsFile {
    web: Option<ClientSecrets>,
    installed: Option<ClientSecrets>,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ClientSecrets {
    /// Read and parse a client secrets file.
    ///
    /// Fails with `CredentialErrorKind::NotFound` if the file cannot be read and with
    /// `CredentialErrorKind::Malformed` if it is not a valid client secrets document.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!("Loading OAuth client secrets from {}", path.display());

        let contents = fs::read_to_string(path).map_err(|e| {
            let kind = match e.kind() {
                IoErrorKind::NotFound => CredentialErrorKind::NotFound,
                _ => CredentialErrorKind::Malformed,
            };
            credential_error(
                kind,
                &format!("Unable to read client secrets file {}: {}", path.display(), e),
            )
        })?;

        Self::from_json(&contents)
    }

    /// Parse the contents of a client secrets file.
    pub fn from_json(contents: &str) -> Result<Self, Error> {
        let file: ClientSecretsFile = serde_json::from_str(contents).map_err(|e| {
            credential_error(
                CredentialErrorKind::Malformed,
                &format!("Invalid client secrets file: {}", e),
            )
        })?;

        file.web.or(file.installed).ok_or_else(|| {
            credential_error(
                CredentialErrorKind::Malformed,
                "Client secrets file must contain a \"web\" or \"installed\" section",
            )
        })
    }
}
