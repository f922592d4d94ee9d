use std::str::FromStr;

use common::ParseEnumError;
use serde::Serialize;

use crate::error::AppError;

/// `{message}` acknowledgement body.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Welcome to the API!")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{msg}` acknowledgement body.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MsgResponse {
    #[schema(example = "Request updated successfully")]
    pub msg: String,
}

impl MsgResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Require a field to be present, returning it unchanged.
pub fn require<T>(value: Option<T>, name: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("Missing required field: {name}")))
}

/// Require a text field to be present and non-blank, returning it trimmed.
pub fn require_text(value: Option<String>, name: &str) -> Result<String, AppError> {
    let value = require(value, name)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Require an enumerated field and parse it into its member.
pub fn require_enum<E>(value: Option<String>, name: &str) -> Result<E, AppError>
where
    E: FromStr<Err = ParseEnumError>,
{
    let raw = require(value, name)?;
    Ok(raw.parse::<E>()?)
}

/// Validate a quantity: a positive integer. Zero is rejected explicitly.
pub fn validate_quantity(quantity: i32) -> Result<i32, AppError> {
    if quantity < 1 {
        return Err(AppError::Validation(
            "Quantity must be a positive integer".into(),
        ));
    }
    Ok(quantity)
}

/// Trim optional free text, mapping blank to `None`.
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
