use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct GenerateSummaryParams {
    /// Full meeting transcript; must not be empty.
    pub(crate) transcript: String,
}
