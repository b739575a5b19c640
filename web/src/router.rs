use crate::controller::{
    health_check_controller, meeting_controller, oauth_controller, summary_controller,
};
use crate::{params, response, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI document. To be a part
// of the rendered document, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "AI Meeting Assistant API"
        ),
        paths(
            health_check_controller::index,
            health_check_controller::test_connection,
            meeting_controller::schedule,
            summary_controller::generate,
            oauth_controller::authorize,
            oauth_controller::callback,
        ),
        components(
            schemas(
                params::meeting::ScheduleMeetingParams,
                params::summary::GenerateSummaryParams,
                response::AuthRequiredResponse,
                response::ErrorResponse,
                response::MeetingScheduledResponse,
                response::MessageResponse,
                response::ScheduleMeetingResponse,
                response::SummaryResponse,
            )
        ),
        tags(
            (name = "meeting_assistant", description = "Schedule meetings and summarize transcripts")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(meeting_routes(app_state.clone()))
        .merge(summary_routes(app_state.clone()))
        .merge(oauth_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(cors_layer())
}

/// The front-end is served from a different origin during development and does
/// not send cookies, so every origin is allowed without credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any)
        .max_age(Duration::from_secs(3600))
}

fn health_routes() -> Router {
    Router::new()
        .route("/", get(health_check_controller::index))
        .route("/test", get(health_check_controller::test_connection))
}

fn meeting_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/schedule-meeting", post(meeting_controller::schedule))
        .with_state(app_state)
}

fn summary_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/generate-summary", post(summary_controller::generate))
        .with_state(app_state)
}

fn oauth_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/google", get(oauth_controller::authorize))
        .route("/oauth2callback", get(oauth_controller::callback))
        .with_state(app_state)
}
