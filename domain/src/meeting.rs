//! Meeting scheduling against the signed in user's Google Calendar.

use crate::authorization;
use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use crate::gateway::google_calendar::{
    Attendee, Event, EventDateTime, Reminders, SEND_UPDATES_ALL,
};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use log::*;
use meeting_auth::oauth::token::{Manager, Storage};
use service::config::Config;

pub const SCHEDULED_MESSAGE: &str = "Meeting scheduled successfully!";

/// Formats accepted for timestamps without an offset; these are read as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, PartialEq)]
pub struct MeetingRequest {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledMeeting {
    pub event_id: String,
    pub event_link: Option<String>,
    pub attendees: Vec<Attendee>,
}

/// Result of a scheduling attempt. Needing consent is an outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleOutcome {
    Scheduled(ScheduledMeeting),
    AuthRequired { auth_url: String },
}

/// Parse an ISO-8601 timestamp and render it in UTC with an explicit `+00:00` offset.
pub fn normalize_timestamp(field: &str, value: &str) -> Result<String, Error> {
    let parsed = match DateTime::parse_from_rfc3339(value) {
        Ok(date_time) => date_time.with_timezone(&Utc),
        Err(rfc3339_err) => NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| {
                let message = format!("Invalid {field} '{value}': {rfc3339_err}");
                Error {
                    source: Some(Box::new(rfc3339_err)),
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(message)),
                }
            })?,
    };

    Ok(parsed.to_rfc3339_opts(SecondsFormat::AutoSi, false))
}

fn build_event(meeting: MeetingRequest, start: String, end: String) -> Event {
    Event {
        summary: meeting.title,
        description: meeting.description,
        start: EventDateTime::utc(start),
        end: EventDateTime::utc(end),
        attendees: meeting.participants.into_iter().map(Attendee::new).collect(),
        reminders: Reminders::default(),
        guests_can_see_other_guests: true,
        guests_can_modify: false,
        send_updates: SEND_UPDATES_ALL.to_string(),
    }
}

/// Create a calendar event for `meeting` and invite its participants.
///
/// Returns `AuthRequired` with a consent URL when nothing is stored, or when Google
/// rejects the stored token (the credentials are dropped in that case).
pub async fn schedule<S: Storage>(
    config: &Config,
    credentials: &Manager<S>,
    meeting: MeetingRequest,
) -> Result<ScheduleOutcome, Error> {
    if credentials.get_credentials().await?.is_none() {
        info!("No stored credentials, asking the user to authorize");
        return Ok(ScheduleOutcome::AuthRequired {
            auth_url: authorization::begin_authorization(config)?,
        });
    }

    let client = authorization::service_handle(config, credentials)
        .await
        .ok_or(Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::ServiceUnavailable),
        })?;

    let start = normalize_timestamp("start_time", &meeting.start_time)?;
    let end = normalize_timestamp("end_time", &meeting.end_time)?;
    debug!("Scheduling '{}' from {} to {}", meeting.title, start, end);

    let event = build_event(meeting, start, end);

    match client.insert_event(&event).await {
        Ok(created) => Ok(ScheduleOutcome::Scheduled(ScheduledMeeting {
            event_id: created.id,
            event_link: created.html_link,
            attendees: created.attendees,
        })),
        Err(Error {
            error_kind: DomainErrorKind::External(ExternalErrorKind::Unauthenticated),
            ..
        }) => {
            warn!("Google rejected the stored access token, clearing credentials");
            credentials.clear_credentials().await?;
            Ok(ScheduleOutcome::AuthRequired {
                auth_url: authorization::begin_authorization(config)?,
            })
        }
        Err(e) => Err(e),
    }
}
