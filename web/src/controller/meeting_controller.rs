use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::params::meeting::ScheduleMeetingParams;
use crate::response::{ErrorResponse, ScheduleMeetingResponse};
use crate::{AppState, Error};
use domain::meeting as MeetingApi;
use log::*;

/// POST schedule a meeting in the signed in user's Google Calendar
///
/// Answers 200 with `auth_required: true` and a consent URL when no Google account
/// is connected yet.
#[utoipa::path(
    post,
    path = "/schedule-meeting",
    request_body = ScheduleMeetingParams,
    responses(
        (status = 200, description = "Meeting scheduled, or authorization required", body = ScheduleMeetingResponse),
        (status = 400, description = "Request body is not a valid meeting", body = ErrorResponse),
        (status = 401, description = "Stored credentials could not be used", body = ErrorResponse),
        (status = 403, description = "Google denied access for this account", body = ErrorResponse),
        (status = 500, description = "Scheduling failed", body = ErrorResponse),
    )
)]
pub async fn schedule(
    State(app_state): State<AppState>,
    params: Result<Json<ScheduleMeetingParams>, JsonRejection>,
) -> Result<Json<ScheduleMeetingResponse>, Error> {
    let Json(params) = params?;

    debug!(
        "POST schedule meeting '{}' with {} participants",
        params.title,
        params.participants.len()
    );

    let outcome = MeetingApi::schedule(
        &app_state.config,
        app_state.credentials.as_ref(),
        params.into(),
    )
    .await?;

    Ok(Json(outcome.into()))
}
