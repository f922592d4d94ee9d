//! Enumerated domain values shared by the stockroom crates.
//!
//! Every value is parsed explicitly through `FromStr` before it reaches
//! persistence, so an unknown member surfaces as a [`ParseEnumError`]
//! instead of a storage failure.

pub mod asset_status;
pub mod error;
pub mod request;
pub mod role;

pub use asset_status::AssetStatus;
pub use error::ParseEnumError;
pub use request::{RequestStatus, RequestType, UrgencyLevel};
pub use role::UserRole;
