//! Google OAuth orchestration: consent URL, callback handling, and turning the
//! stored credential set into a calendar client.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use crate::gateway::google_calendar;
use log::*;
use meeting_auth::credentials::ClientSecrets;
use meeting_auth::oauth::providers::google;
use meeting_auth::oauth::token::{CredentialSet, Manager, Storage};
use meeting_auth::oauth::Provider;
use secrecy::ExposeSecret;
use service::config::Config;

fn google_provider(config: &Config) -> Result<google::Provider, Error> {
    let secrets = ClientSecrets::from_file(config.client_secrets_file()).inspect_err(|e| {
        warn!(
            "Failed to load client secrets from {}: {}",
            config.client_secrets_file(),
            e
        )
    })?;

    Ok(google::Provider::new(
        secrets,
        config.google_scopes(),
        config.google_redirect_uri().to_string(),
    ))
}

/// Build the Google consent URL the user must visit.
pub fn begin_authorization(config: &Config) -> Result<String, Error> {
    let provider = google_provider(config)?;
    let auth_request = provider.authorization_url()?;

    info!("Redirecting user to Google OAuth");
    Ok(auth_request.url)
}

/// Exchange an authorization code for tokens and store them as the only credential set.
pub async fn complete_authorization<S: Storage>(
    config: &Config,
    credentials: &Manager<S>,
    authorization_code: &str,
) -> Result<CredentialSet, Error> {
    info!("Processing Google OAuth callback");

    let provider = google_provider(config)?;
    let tokens = provider
        .exchange_code(authorization_code)
        .await
        .inspect_err(|e| warn!("Failed to exchange OAuth code: {}", e))?;

    let credential_set = CredentialSet::from_tokens(tokens, provider.secrets());
    credentials.store_credentials(credential_set.clone()).await?;

    info!("Stored Google credentials");
    Ok(credential_set)
}

/// Translate the `error` query parameter Google sends when consent was not granted.
pub fn reject_authorization(error: &str) -> Error {
    warn!("Google OAuth callback returned error: {}", error);
    google::callback_error(error).into()
}

/// Return a calendar client bound to the stored credentials, refreshing an expired
/// access token first. Any failure is logged and reported as `None`.
pub async fn service_handle<S: Storage>(
    config: &Config,
    credentials: &Manager<S>,
) -> Option<google_calendar::Client> {
    match try_service_handle(config, credentials).await {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("Failed to create calendar service: {}", e);
            None
        }
    }
}

async fn try_service_handle<S: Storage>(
    config: &Config,
    credentials: &Manager<S>,
) -> Result<google_calendar::Client, Error> {
    let stored = credentials.get_credentials().await?.ok_or(Error {
        source: None,
        error_kind: DomainErrorKind::External(ExternalErrorKind::Unauthenticated),
    })?;

    let provider = google::Provider::new(
        stored.client_secrets(),
        stored.scopes.clone(),
        config.google_redirect_uri().to_string(),
    );
    let valid = credentials.get_valid_credentials(&provider).await?;

    google_calendar::Client::new(
        valid.token.expose_secret(),
        config.google_calendar_base_url(),
        config.google_calendar_id(),
    )
}
