//! Response bodies. Field names match what the bundled front-end reads.

use domain::meeting::{ScheduleOutcome, ScheduledMeeting, SCHEDULED_MESSAGE};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub(crate) message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorResponse {
    pub(crate) detail: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SummaryResponse {
    pub(crate) summary: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MeetingScheduledResponse {
    pub(crate) message: String,
    pub(crate) event_id: String,
    pub(crate) event_link: Option<String>,
    /// Email addresses of the invited attendees.
    pub(crate) attendees: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthRequiredResponse {
    pub(crate) auth_required: bool,
    pub(crate) auth_url: String,
}

/// Either the created event or the consent URL the user must visit first.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum ScheduleMeetingResponse {
    Scheduled(MeetingScheduledResponse),
    AuthRequired(AuthRequiredResponse),
}

impl From<ScheduleOutcome> for ScheduleMeetingResponse {
    fn from(outcome: ScheduleOutcome) -> Self {
        match outcome {
            ScheduleOutcome::Scheduled(ScheduledMeeting {
                event_id,
                event_link,
                attendees,
            }) => Self::Scheduled(MeetingScheduledResponse {
                message: SCHEDULED_MESSAGE.to_string(),
                event_id,
                event_link,
                attendees: attendees
                    .into_iter()
                    .map(|attendee| attendee.email)
                    .collect(),
            }),
            ScheduleOutcome::AuthRequired { auth_url } => {
                Self::AuthRequired(AuthRequiredResponse {
                    auth_required: true,
                    auth_url,
                })
            }
        }
    }
}
