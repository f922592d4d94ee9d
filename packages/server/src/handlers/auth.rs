use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::input::AppJson;
use crate::models::auth::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse,
    validate_login_request, validate_register_request,
};
use crate::models::shared::MessageResponse;
use crate::service::AuthService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    operation_id = "register",
    summary = "Register a new user",
    description = "Creates an account with a hashed password. Every field is required and `role` must be one of `Admin`, `Procurement_Manager`, `Employee`.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR) or duplicate username (USERNAME_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = ?payload.username))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_user = validate_register_request(payload)?;
    let user = AuthService::new(&state.db).register(new_user).await?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");
    Ok((StatusCode::CREATED, Json(RegisterResponse::from(user))))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Exchange credentials for a bearer token",
    description = "Unknown usernames and wrong passwords produce the same 401 response.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Bad username or password (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = ?payload.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (username, password) = validate_login_request(payload)?;
    let auth = &state.config.auth;

    let access_token = AuthService::new(&state.db)
        .login(&username, &password, &auth.jwt_secret, auth.token_ttl_secs)
        .await?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: auth.token_ttl_secs,
    }))
}

/// Tokens are stateless, so logging out only acknowledges the call. A token
/// stays valid until it expires.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "Acknowledge a logout",
    description = "Does not revoke the token; clients should discard it.",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
    ),
)]
#[instrument]
pub async fn logout() -> Json<MessageResponse> {
    tracing::info!("Logout acknowledged");
    Json(MessageResponse::new("Successfully logged out"))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "getCurrentUser",
    summary = "Get the current user",
    description = "Returns the identity carried by the bearer token.",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user), fields(user_id = auth_user.user_id))]
pub async fn me(auth_user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: auth_user.user_id,
        username: auth_user.username,
        role: auth_user.role,
    })
}
