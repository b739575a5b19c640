use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::params::summary::GenerateSummaryParams;
use crate::response::{ErrorResponse, SummaryResponse};
use crate::{AppState, Error};
use domain::summary as SummaryApi;

/// POST summarize a meeting transcript
#[utoipa::path(
    post,
    path = "/generate-summary",
    request_body = GenerateSummaryParams,
    responses(
        (status = 200, description = "Summary generated", body = SummaryResponse),
        (status = 400, description = "Transcript is empty or the body is malformed", body = ErrorResponse),
        (status = 500, description = "Summarization failed", body = ErrorResponse),
    )
)]
pub async fn generate(
    State(app_state): State<AppState>,
    params: Result<Json<GenerateSummaryParams>, JsonRejection>,
) -> Result<Json<SummaryResponse>, Error> {
    let Json(params) = params?;
    let summary = SummaryApi::generate(app_state.summarizer.as_ref(), &params.transcript).await?;

    Ok(Json(SummaryResponse { summary }))
}
