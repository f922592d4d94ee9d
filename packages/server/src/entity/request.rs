use chrono::Utc;
use common::{RequestStatus, RequestType, UrgencyLevel};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    /// NULL for `New_Asset` requests.
    pub asset_id: Option<i32>,
    #[sea_orm(belongs_to, from = "asset_id", to = "id", on_delete = "Cascade")]
    pub asset: BelongsTo<Option<super::asset::Entity>>,

    pub request_type: RequestType,
    #[sea_orm(column_type = "Text")]
    pub reason: Option<String>,
    pub quantity: i32,
    pub urgency: UrgencyLevel,
    #[sea_orm(indexed)]
    pub status: RequestStatus,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
