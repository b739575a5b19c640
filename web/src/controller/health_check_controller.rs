use axum::Json;

use crate::response::MessageResponse;

/// GET API banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API router is up and responding to requests", body = MessageResponse),
    )
)]
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new("AI Meeting Assistant API"))
}

/// GET connectivity check used by the front-end
#[utoipa::path(
    get,
    path = "/test",
    responses(
        (status = 200, description = "Backend is reachable", body = MessageResponse),
    )
)]
pub async fn test_connection() -> Json<MessageResponse> {
    Json(MessageResponse::new("Backend is working correctly!"))
}
