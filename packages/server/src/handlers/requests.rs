use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::input::{AppJson, AppPath};
use crate::models::request::*;
use crate::models::shared::MsgResponse;
use crate::service::RequestService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/requests",
    tag = "Requests",
    operation_id = "createRequest",
    summary = "File a request",
    description = "Files a `New_Asset` or `Repair` request for the named user and records the initial history entry. Employees may only file `Pending` requests under their own username. `Repair` requests must name an asset. `quantity` defaults to 1.",
    request_body = CreateRequestRequest,
    responses(
        (status = 201, description = "Request created", body = CreateRequestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User or asset not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(username = ?payload.username))]
pub async fn create_request(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRequestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_request = validate_create_request(payload)?;
    let request = RequestService::new(&state.db)
        .create(&auth_user, new_request)
        .await?;

    tracing::info!(request_id = request.id, "Request created");
    Ok((
        StatusCode::CREATED,
        Json(CreateRequestResponse {
            msg: "Request created successfully".into(),
            request_id: request.id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/requests",
    tag = "Requests",
    operation_id = "listRequests",
    summary = "List every request",
    responses(
        (status = 200, description = "All requests ordered by id", body = Vec<RequestResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Requests could not be loaded (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_requests(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RequestResponse>>, AppError> {
    let requests = RequestService::new(&state.db).list().await?;
    Ok(Json(requests.into_iter().map(RequestResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "Requests",
    operation_id = "getRequest",
    summary = "Get a request by ID",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = RequestResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Request not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_request(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<RequestResponse>, AppError> {
    let request = RequestService::new(&state.db).get(id).await?;
    Ok(Json(request.into()))
}

#[utoipa::path(
    get,
    path = "/requests/{id}/history",
    tag = "Requests",
    operation_id = "getRequestHistory",
    summary = "Get the status history of a request",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "History entries, oldest first", body = Vec<HistoryResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Request not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_request_history(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<Vec<HistoryResponse>>, AppError> {
    let history = RequestService::new(&state.db).history(id).await?;
    Ok(Json(history.into_iter().map(HistoryResponse::from).collect()))
}

#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "Requests",
    operation_id = "updateRequest",
    summary = "Edit a request",
    description = "Replaces `request_type`, `reason` and `quantity`. All three are required. The status is left unchanged. Employees may only edit their own requests.",
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequestRequest,
    responses(
        (status = 200, description = "Request updated", body = MsgResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Request not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_request(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateRequestRequest>,
) -> Result<Json<MsgResponse>, AppError> {
    let edit = validate_update_request(payload)?;
    RequestService::new(&state.db)
        .update(&auth_user, id, edit)
        .await?;
    Ok(Json(MsgResponse::new("Request updated successfully")))
}

#[utoipa::path(
    put,
    path = "/requests/{id}/status",
    tag = "Requests",
    operation_id = "updateRequestStatus",
    summary = "Approve or reject a request",
    description = "Moves a `Pending` request to `Approved` or `Rejected` and appends a history entry. Any other transition is a conflict. Requires the Admin or Procurement_Manager role.",
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = RequestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Request not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Illegal status transition (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_request_status(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateStatusRequest>,
) -> Result<Json<RequestResponse>, AppError> {
    auth_user.require_manager()?;
    let change = validate_status_request(payload)?;

    let request = RequestService::new(&state.db)
        .transition(&auth_user, id, change)
        .await?;
    tracing::info!(request_id = id, status = %request.status, "Request status changed");
    Ok(Json(request.into()))
}

#[utoipa::path(
    delete,
    path = "/requests/{id}",
    tag = "Requests",
    operation_id = "deleteRequest",
    summary = "Delete a request",
    description = "Deletes the request and its history. Employees may only delete their own requests.",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request deleted", body = MsgResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Request not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_request(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<MsgResponse>, AppError> {
    RequestService::new(&state.db).delete(&auth_user, id).await?;
    tracing::info!(request_id = id, "Request deleted");
    Ok(Json(MsgResponse::new("Request deleted successfully")))
}
