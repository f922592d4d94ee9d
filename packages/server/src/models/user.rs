use chrono::{DateTime, Utc};
use common::UserRole;
use serde::Serialize;

/// Public projection of a user. The password hash is never part of it.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "bob")]
    pub username: String,
    pub role: UserRole,
    #[schema(example = "b@x.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::user::Model> for UserResponse {
    fn from(m: crate::entity::user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            role: m.role,
            email: m.email,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
