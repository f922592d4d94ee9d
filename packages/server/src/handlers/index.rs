use axum::{Json, http::StatusCode};

use crate::error::ErrorBody;
use crate::models::shared::MessageResponse;

#[utoipa::path(
    get,
    path = "/",
    tag = "Meta",
    operation_id = "index",
    summary = "API greeting",
    responses(
        (status = 200, description = "Greeting", body = MessageResponse),
    ),
)]
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the API!"))
}

/// Fallback for every unmatched path.
pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::route_not_found()))
}

/// Fallback for a known path hit with a method it does not serve.
pub async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::method_not_allowed()),
    )
}
