#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnumError;

/// Role carried by every user account and embedded in access tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum UserRole {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Admin"))]
    Admin,
    #[serde(rename = "Procurement_Manager")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Procurement_Manager"))]
    ProcurementManager,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Employee"))]
    Employee,
}

impl UserRole {
    pub const ALL: &'static [UserRole] = &[Self::Admin, Self::ProcurementManager, Self::Employee];

    const NAMES: &'static [&'static str] = &["Admin", "Procurement_Manager", "Employee"];

    /// Roles allowed to approve requests and move assets between users.
    pub const MANAGERS: &'static [UserRole] = &[Self::Admin, Self::ProcurementManager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::ProcurementManager => "Procurement_Manager",
            Self::Employee => "Employee",
        }
    }

    pub fn is_manager(&self) -> bool {
        Self::MANAGERS.contains(self)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Procurement_Manager" => Ok(Self::ProcurementManager),
            "Employee" => Ok(Self::Employee),
            _ => Err(ParseEnumError::new("role", s, Self::NAMES)),
        }
    }
}
