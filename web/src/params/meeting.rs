use domain::meeting::MeetingRequest;
use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for scheduling a meeting.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ScheduleMeetingParams {
    #[schema(example = "Sprint planning")]
    pub(crate) title: String,
    pub(crate) description: String,
    /// ISO-8601 timestamp; values without an offset are read as UTC.
    #[schema(example = "2025-01-15T10:00:00Z")]
    pub(crate) start_time: String,
    #[schema(example = "2025-01-15T11:00:00Z")]
    pub(crate) end_time: String,
    /// Email addresses to invite.
    pub(crate) participants: Vec<String>,
}

impl From<ScheduleMeetingParams> for MeetingRequest {
    fn from(params: ScheduleMeetingParams) -> Self {
        Self {
            title: params.title,
            description: params.description,
            start_time: params.start_time,
            end_time: params.end_time,
            participants: params.participants,
        }
    }
}
