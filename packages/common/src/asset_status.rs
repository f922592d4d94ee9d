#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnumError;

/// Availability of an inventory item.
///
/// `Allocated` is the only status under which an asset carries an
/// `allocated_to` user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum AssetStatus {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Available"))]
    Available,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Allocated"))]
    Allocated,
    #[serde(rename = "Under_Repair")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Under_Repair"))]
    UnderRepair,
}

impl AssetStatus {
    pub const ALL: &'static [AssetStatus] = &[Self::Available, Self::Allocated, Self::UnderRepair];

    const NAMES: &'static [&'static str] = &["Available", "Allocated", "Under_Repair"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Allocated => "Allocated",
            Self::UnderRepair => "Under_Repair",
        }
    }

    /// Whether an asset in this status must reference the user holding it.
    pub fn requires_holder(&self) -> bool {
        matches!(self, Self::Allocated)
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(Self::Available),
            "Allocated" => Ok(Self::Allocated),
            "Under_Repair" => Ok(Self::UnderRepair),
            _ => Err(ParseEnumError::new("status", s, Self::NAMES)),
        }
    }
}
