use chrono::{DateTime, Utc};
use common::AssetStatus;
use serde::{Deserialize, Serialize};

use super::shared::require;
use crate::error::AppError;

#[derive(Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Electronics")]
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AssetResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Dell Laptop")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 1)]
    pub category_id: i32,
    pub status: AssetStatus,
    pub image_url: Option<String>,
    /// User currently holding the asset; set only while `Allocated`.
    pub allocated_to: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional filters for the asset listing.
#[derive(Deserialize, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssetListQuery {
    /// Only assets in this category.
    pub category_id: Option<i32>,
    /// Only assets with this status (`Available`, `Allocated`, `Under_Repair`).
    pub status: Option<String>,
}

/// Parsed form of [`AssetListQuery`].
#[derive(Debug, Default, PartialEq)]
pub struct AssetFilter {
    pub category_id: Option<i32>,
    pub status: Option<AssetStatus>,
}

pub fn parse_asset_filter(query: AssetListQuery) -> Result<AssetFilter, AppError> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<AssetStatus>()?),
    };
    Ok(AssetFilter {
        category_id: query.category_id,
        status,
    })
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AllocateAssetRequest {
    /// User who will hold the asset.
    #[schema(example = 3)]
    pub user_id: Option<i32>,
}

pub fn validate_allocate_request(payload: AllocateAssetRequest) -> Result<i32, AppError> {
    require(payload.user_id, "user_id")
}

impl From<crate::entity::category::Model> for CategoryResponse {
    fn from(m: crate::entity::category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<crate::entity::asset::Model> for AssetResponse {
    fn from(m: crate::entity::asset::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            category_id: m.category_id,
            status: m.status,
            image_url: m.image_url,
            allocated_to: m.allocated_to,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
