use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::ParseEnumError;
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `USERNAME_TAKEN`,
    /// `TOKEN_MISSING`, `TOKEN_INVALID`, `INVALID_CREDENTIALS`, `PERMISSION_DENIED`,
    /// `NOT_FOUND`, `METHOD_NOT_ALLOWED`, `CONFLICT`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Invalid urgency_level 'Extreme'. Valid values: Low, Medium, High")]
    pub msg: String,
    /// Short status phrase.
    #[schema(example = "Bad request")]
    pub error: &'static str,
}

impl ErrorBody {
    pub fn new(code: &'static str, msg: impl Into<String>, error: &'static str) -> Self {
        Self {
            code,
            msg: msg.into(),
            error,
        }
    }

    /// Body used for unmatched routes.
    pub fn route_not_found() -> Self {
        Self::new("NOT_FOUND", "Not found", "Not found")
    }

    pub fn method_not_allowed() -> Self {
        Self::new(
            "METHOD_NOT_ALLOWED",
            "Method not allowed",
            "Method not allowed",
        )
    }

    /// Body used whenever the cause of a failure must stay server-side.
    pub fn internal() -> Self {
        Self::new(
            "INTERNAL_ERROR",
            "An unexpected error occurred",
            "Internal server error",
        )
    }
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    UsernameTaken,
    TokenMissing,
    TokenInvalid,
    /// Unknown username and wrong password both map here, with one message.
    InvalidCredentials,
    PermissionDenied,
    NotFound(String),
    /// Duplicate data or an illegal state transition.
    Conflict(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("VALIDATION_ERROR", msg, "Bad request"),
            ),
            AppError::UsernameTaken => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("USERNAME_TAKEN", "Username already exists", "Bad request"),
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("TOKEN_MISSING", "Authentication required", "Unauthorized"),
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("TOKEN_INVALID", "Invalid or expired token", "Unauthorized"),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new(
                    "INVALID_CREDENTIALS",
                    "Bad username or password",
                    "Unauthorized",
                ),
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                ErrorBody::new("PERMISSION_DENIED", "Insufficient permissions", "Forbidden"),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("NOT_FOUND", msg, "Not found"),
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody::new("CONFLICT", msg, "Conflict"),
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ParseEnumError> for AppError {
    fn from(err: ParseEnumError) -> Self {
        AppError::Validation(err.to_string())
    }
}
