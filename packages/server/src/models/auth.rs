use common::UserRole;
use serde::{Deserialize, Serialize};

use super::shared::{require, require_enum, require_text};
use crate::error::AppError;

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Unique username (1-255 characters).
    #[schema(example = "bob")]
    pub username: Option<String>,
    #[schema(example = "pw1")]
    pub password: Option<String>,
    /// One of `Admin`, `Procurement_Manager`, `Employee`.
    #[schema(example = "Employee")]
    pub role: Option<String>,
    #[schema(example = "b@x.com")]
    pub email: Option<String>,
}

/// A registration that passed validation.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub email: String,
}

pub fn validate_register_request(payload: RegisterRequest) -> Result<NewUser, AppError> {
    let username = require_text(payload.username, "username")?;
    if username.chars().count() > 255 {
        return Err(AppError::Validation(
            "Username must be 1-255 characters".into(),
        ));
    }

    let password = require(payload.password, "password")?;
    if password.is_empty() {
        return Err(AppError::Validation("password must not be empty".into()));
    }

    let role: UserRole = require_enum(payload.role, "role")?;

    let email = require_text(payload.email, "email")?;
    if !email.contains('@') || email.chars().count() > 255 {
        return Err(AppError::Validation("Email address is not valid".into()));
    }

    Ok(NewUser {
        username,
        password,
        role,
        email,
    })
}

/// Request body for user login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "bob")]
    pub username: Option<String>,
    #[schema(example = "pw1")]
    pub password: Option<String>,
}

pub fn validate_login_request(payload: LoginRequest) -> Result<(String, String), AppError> {
    let username = require_text(payload.username, "username")?;
    let password = require(payload.password, "password")?;
    if password.is_empty() {
        return Err(AppError::Validation("password must not be empty".into()));
    }
    Ok((username, password))
}

/// Successful registration response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    /// ID of the newly created user.
    #[schema(example = 42)]
    pub id: i32,
    pub role: UserRole,
}

impl From<crate::entity::user::Model> for RegisterResponse {
    fn from(user: crate::entity::user::Model) -> Self {
        Self {
            message: "User registered successfully".into(),
            id: user.id,
            role: user.role,
        }
    }
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: &'static str,
    /// Seconds until the token expires.
    #[schema(example = 3600)]
    pub expires_in: u64,
}

/// Identity carried by the caller's token.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "bob")]
    pub username: String,
    pub role: UserRole,
}
