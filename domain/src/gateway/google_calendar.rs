//! Google Calendar API client for creating meeting events.
//!
//! This module provides an HTTP client for interacting with the Google Calendar API
//! to insert events and have Google send invitations to every attendee.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use log::*;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Ask Google to email invitations to all attendees.
pub const SEND_UPDATES_ALL: &str = "all";

/// Start or end of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    pub time_zone: String,
}

impl EventDateTime {
    pub fn utc(date_time: String) -> Self {
        Self {
            date_time,
            time_zone: "UTC".to_string(),
        }
    }
}

/// An event guest, as sent to and returned by the Calendar API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub email: String,
}

impl Attendee {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

impl Default for Reminders {
    /// An email a day ahead and a popup half an hour ahead.
    fn default() -> Self {
        Self {
            use_default: false,
            overrides: vec![
                ReminderOverride {
                    method: "email".to_string(),
                    minutes: 24 * 60,
                },
                ReminderOverride {
                    method: "popup".to_string(),
                    minutes: 30,
                },
            ],
        }
    }
}

/// Request body for `events.insert`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub attendees: Vec<Attendee>,
    pub reminders: Reminders,
    pub guests_can_see_other_guests: bool,
    pub guests_can_modify: bool,
    pub send_updates: String,
}

/// Response from inserting an event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    pub id: String,
    #[serde(default)]
    pub html_link: Option<String>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}

/// Google API error envelope: `{"error": {"code": 403, "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Prefer Google's own error message, falling back to the raw body.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.is_empty() => format!("Google Calendar API returned {status}"),
        Err(_) => body.to_string(),
    }
}

/// Google Calendar API client
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    calendar_id: String,
}

impl Client {
    /// Create a new Google Calendar client with the given access token, base URL and calendar
    pub fn new(access_token: &str, base_url: &str, calendar_id: &str) -> Result<Self, Error> {
        let mut headers = reqwest::header::HeaderMap::new();

        let auth_value = format!("Bearer {}", access_token);
        let mut header_value =
            reqwest::header::HeaderValue::from_str(&auth_value).map_err(|e| {
                warn!("Failed to create auth header: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                        "Invalid access token format".to_string(),
                    )),
                }
            })?;
        header_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, header_value);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            calendar_id: calendar_id.to_string(),
        })
    }

    /// Insert an event and notify every attendee.
    ///
    /// A 401 from Google maps to `Unauthenticated` so the caller can drop the
    /// stored credentials, a 403 to `AuthorizationDenied`.
    pub async fn insert_event(&self, event: &Event) -> Result<CreatedEvent, Error> {
        let url = format!(
            "{}/calendars/{}/events?sendUpdates={}",
            self.base_url,
            urlencoding::encode(&self.calendar_id),
            SEND_UPDATES_ALL
        );

        debug!(
            "Creating calendar event with {} attendees",
            event.attendees.len()
        );

        let response = self
            .client
            .post(&url)
            .json(event)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to create calendar event: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        let status = response.status();
        if status.is_success() {
            let created: CreatedEvent = response.json().await.map_err(|e| {
                warn!("Failed to parse Google Calendar response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Service(
                        "Invalid response from Google Calendar API".to_string(),
                    )),
                }
            })?;
            info!("Created calendar event: {}", created.id);
            return Ok(created);
        }

        let error_text = response.text().await.unwrap_or_default();
        warn!("Google Calendar API error ({}): {}", status, error_text);
        let message = error_message(status, &error_text);

        let error_kind = match status {
            StatusCode::UNAUTHORIZED => DomainErrorKind::External(ExternalErrorKind::Unauthenticated),
            StatusCode::FORBIDDEN => {
                DomainErrorKind::External(ExternalErrorKind::AuthorizationDenied)
            }
            _ => DomainErrorKind::External(ExternalErrorKind::Service(message.clone())),
        };

        Err(Error {
            source: Some(message.into()),
            error_kind,
        })
    }
}
