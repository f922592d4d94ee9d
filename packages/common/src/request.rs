#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnumError;

/// What a request asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum RequestType {
    /// Procure something not yet in the inventory. Carries no asset.
    #[serde(rename = "New_Asset")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "New_Asset"))]
    NewAsset,
    /// Repair an existing asset.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Repair"))]
    Repair,
}

impl RequestType {
    const NAMES: &'static [&'static str] = &["New_Asset", "Repair"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewAsset => "New_Asset",
            Self::Repair => "Repair",
        }
    }

    pub fn requires_asset(&self) -> bool {
        matches!(self, Self::Repair)
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New_Asset" => Ok(Self::NewAsset),
            "Repair" => Ok(Self::Repair),
            _ => Err(ParseEnumError::new("request_type", s, Self::NAMES)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum UrgencyLevel {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Low"))]
    Low,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Medium"))]
    Medium,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "High"))]
    High,
}

impl UrgencyLevel {
    const NAMES: &'static [&'static str] = &["Low", "Medium", "High"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrgencyLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            _ => Err(ParseEnumError::new("urgency_level", s, Self::NAMES)),
        }
    }
}

/// Review state of a request.
///
/// `Pending` is the initial state. `Approved` and `Rejected` are terminal:
/// there is no transition out of them, including back to `Pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum RequestStatus {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Pending"))]
    Pending,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Approved"))]
    Approved,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Rejected"))]
    Rejected,
}

impl RequestStatus {
    pub const ALL: &'static [RequestStatus] = &[Self::Pending, Self::Approved, Self::Rejected];

    const NAMES: &'static [&'static str] = &["Pending", "Approved", "Rejected"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns true if a request may move from `self` to `next`.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl FromStr for RequestStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(ParseEnumError::new("status", s, Self::NAMES)),
        }
    }
}
