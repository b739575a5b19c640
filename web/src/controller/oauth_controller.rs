//! Controller for the Google OAuth flow.
//!
//! Both endpoints are reached through browser redirects, so they answer with
//! redirects rather than JSON on success.

use crate::error::WebErrorKind;
use crate::params::oauth::CallbackParams;
use crate::response::ErrorResponse;
use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};

use domain::authorization;

/// GET /auth/google
///
/// Redirects the browser to Google's consent page.
#[utoipa::path(
    get,
    path = "/auth/google",
    responses(
        (status = 307, description = "Redirect to Google OAuth"),
        (status = 500, description = "Client secrets missing or malformed", body = ErrorResponse),
    )
)]
pub async fn authorize(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let url = authorization::begin_authorization(&app_state.config)?;
    Ok(Redirect::temporary(&url))
}

/// GET /oauth2callback
///
/// Handles the OAuth callback from Google after user authorization.
#[utoipa::path(
    get,
    path = "/oauth2callback",
    params(CallbackParams),
    responses(
        (status = 307, description = "Redirect to the front-end on success"),
        (status = 400, description = "Neither code nor error present", body = ErrorResponse),
        (status = 403, description = "The user declined access", body = ErrorResponse),
        (status = 500, description = "Token exchange failed", body = ErrorResponse),
    )
)]
pub async fn callback(
    State(app_state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    if let Some(error) = params.error.as_deref() {
        return Err(authorization::reject_authorization(error).into());
    }

    let code = params
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or_else(|| {
            Error::Web(WebErrorKind::Input(
                "Missing authorization code".to_string(),
            ))
        })?;

    authorization::complete_authorization(&app_state.config, app_state.credentials.as_ref(), code)
        .await?;

    Ok(Redirect::temporary(
        app_state.config.google_oauth_success_redirect_uri(),
    ))
}
