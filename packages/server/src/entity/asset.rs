use chrono::Utc;
use common::AssetStatus;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,

    #[sea_orm(indexed)]
    pub category_id: i32,
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: HasOne<super::category::Entity>,

    /// Set exactly when `status` is `Allocated`.
    #[sea_orm(indexed)]
    pub status: AssetStatus,
    #[sea_orm(column_type = "Text")]
    pub image_url: Option<String>,

    pub allocated_to: Option<i32>,
    #[sea_orm(belongs_to, from = "allocated_to", to = "id", on_delete = "SetNull")]
    pub holder: BelongsTo<Option<super::user::Entity>>,

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
