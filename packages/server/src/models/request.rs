use chrono::{DateTime, Utc};
use common::{RequestStatus, RequestType, UrgencyLevel};
use serde::{Deserialize, Serialize};

use super::shared::{
    normalize_optional_text, require, require_enum, require_text, validate_quantity,
};
use crate::error::AppError;

/// Request body for filing a request.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRequestRequest {
    /// Username of the requester.
    #[schema(example = "bob")]
    pub username: Option<String>,
    /// Target asset. Omit or send `null` for `New_Asset` requests.
    pub asset_id: Option<i32>,
    /// One of `Low`, `Medium`, `High`.
    #[schema(example = "High")]
    pub urgency_level: Option<String>,
    /// Initial status, normally `Pending`.
    #[schema(example = "Pending")]
    pub status: Option<String>,
    /// One of `New_Asset`, `Repair`.
    #[schema(example = "New_Asset")]
    pub request_type: Option<String>,
    #[schema(example = "New laptop needed for work.")]
    pub reason: Option<String>,
    /// Positive integer, defaults to 1.
    #[schema(example = 1)]
    pub quantity: Option<i32>,
}

/// A request that passed validation, with every enum parsed.
#[derive(Debug, PartialEq)]
pub struct NewRequest {
    pub username: String,
    pub asset_id: Option<i32>,
    pub urgency: UrgencyLevel,
    pub status: RequestStatus,
    pub request_type: RequestType,
    pub reason: Option<String>,
    pub quantity: i32,
}

pub fn validate_create_request(payload: CreateRequestRequest) -> Result<NewRequest, AppError> {
    let username = require_text(payload.username, "username")?;
    let urgency = require_enum(payload.urgency_level, "urgency_level")?;
    let status = require_enum(payload.status, "status")?;
    let request_type: RequestType = require_enum(payload.request_type, "request_type")?;
    let quantity = validate_quantity(payload.quantity.unwrap_or(1))?;
    validate_asset_for_type(request_type, payload.asset_id)?;

    Ok(NewRequest {
        username,
        asset_id: payload.asset_id,
        urgency,
        status,
        request_type,
        reason: normalize_optional_text(payload.reason),
        quantity,
    })
}

/// Request body for editing a request's content.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateRequestRequest {
    #[schema(example = "Repair")]
    pub request_type: Option<String>,
    #[schema(example = "Screen flickers after the update.")]
    pub reason: Option<String>,
    #[schema(example = 2)]
    pub quantity: Option<i32>,
}

#[derive(Debug, PartialEq)]
pub struct RequestEdit {
    pub request_type: RequestType,
    pub reason: String,
    pub quantity: i32,
}

pub fn validate_update_request(payload: UpdateRequestRequest) -> Result<RequestEdit, AppError> {
    let request_type = require_enum(payload.request_type, "request_type")?;
    let reason = require_text(payload.reason, "reason")?;
    let quantity = validate_quantity(require(payload.quantity, "quantity")?)?;

    Ok(RequestEdit {
        request_type,
        reason,
        quantity,
    })
}

/// `Repair` requests must name the asset to repair.
pub fn validate_asset_for_type(
    request_type: RequestType,
    asset_id: Option<i32>,
) -> Result<(), AppError> {
    if request_type.requires_asset() && asset_id.is_none() {
        return Err(AppError::Validation(
            "asset_id is required for Repair requests".into(),
        ));
    }
    Ok(())
}

/// Request body for moving a request through review.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateStatusRequest {
    /// `Approved` or `Rejected`.
    #[schema(example = "Approved")]
    pub status: Option<String>,
    /// Stored on the history entry.
    #[schema(example = "Budget approved for Q3.")]
    pub comment: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct StatusChange {
    pub status: RequestStatus,
    pub comment: Option<String>,
}

pub fn validate_status_request(payload: UpdateStatusRequest) -> Result<StatusChange, AppError> {
    Ok(StatusChange {
        status: require_enum(payload.status, "status")?,
        comment: normalize_optional_text(payload.comment),
    })
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RequestResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 3)]
    pub user_id: i32,
    pub asset_id: Option<i32>,
    pub request_type: RequestType,
    pub reason: Option<String>,
    #[schema(example = 1)]
    pub quantity: i32,
    pub urgency_level: UrgencyLevel,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CreateRequestResponse {
    #[schema(example = "Request created successfully")]
    pub msg: String,
    #[schema(example = 1)]
    pub request_id: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HistoryResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub request_id: i32,
    pub status: RequestStatus,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::request::Model> for RequestResponse {
    fn from(m: crate::entity::request::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            asset_id: m.asset_id,
            request_type: m.request_type,
            reason: m.reason,
            quantity: m.quantity,
            urgency_level: m.urgency,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<crate::entity::request_history::Model> for HistoryResponse {
    fn from(m: crate::entity::request_history::Model) -> Self {
        Self {
            id: m.id,
            request_id: m.request_id,
            status: m.status,
            comment: m.comment,
            created_at: m.created_at,
        }
    }
}
