use common::AssetStatus;
use sea_orm::sea_query::LockType;
use sea_orm::*;

use crate::database::finish;
use crate::entity::{asset, category, request, user};
use crate::error::AppError;
use crate::models::catalog::AssetFilter;

/// Read access to users, categories and assets, plus the allocation
/// operations that keep `asset.status` and `asset.allocated_to` in step.
pub struct CatalogService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CatalogService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>, AppError> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(self.conn)
            .await?)
    }

    pub async fn get_user(&self, id: i32) -> Result<user::Model, AppError> {
        find_user(self.conn, id).await
    }

    /// Requests filed by one user, oldest first.
    pub async fn requests_for_user(&self, user_id: i32) -> Result<Vec<request::Model>, AppError> {
        find_user(self.conn, user_id).await?;
        Ok(request::Entity::find()
            .filter(request::Column::UserId.eq(user_id))
            .order_by_asc(request::Column::Id)
            .all(self.conn)
            .await?)
    }

    pub async fn list_categories(&self) -> Result<Vec<category::Model>, AppError> {
        Ok(category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(self.conn)
            .await?)
    }

    pub async fn get_category(&self, id: i32) -> Result<category::Model, AppError> {
        category::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".into()))
    }

    pub async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<asset::Model>, AppError> {
        let mut select = asset::Entity::find();
        if let Some(category_id) = filter.category_id {
            select = select.filter(asset::Column::CategoryId.eq(category_id));
        }
        if let Some(status) = filter.status {
            select = select.filter(asset::Column::Status.eq(status));
        }
        Ok(select
            .order_by_asc(asset::Column::Id)
            .all(self.conn)
            .await?)
    }

    pub async fn get_asset(&self, id: i32) -> Result<asset::Model, AppError> {
        find_asset(self.conn, id).await
    }
}

impl<'a, C: ConnectionTrait + TransactionTrait> CatalogService<'a, C> {
    /// Hand an `Available` asset to a user.
    pub async fn allocate_asset(&self, id: i32, user_id: i32) -> Result<asset::Model, AppError> {
        let txn = self.conn.begin().await?;
        let result: Result<asset::Model, AppError> = async {
            let existing = find_asset_for_update(&txn, id).await?;
            if existing.status != AssetStatus::Available {
                return Err(AppError::Conflict(format!(
                    "Asset is {} and cannot be allocated",
                    existing.status
                )));
            }
            find_user(&txn, user_id).await?;

            let mut active: asset::ActiveModel = existing.into();
            active.status = Set(AssetStatus::Allocated);
            active.allocated_to = Set(Some(user_id));
            Ok(active.update(&txn).await?)
        }
        .await;
        finish(txn, result).await
    }

    /// Take an `Allocated` asset back into stock.
    pub async fn release_asset(&self, id: i32) -> Result<asset::Model, AppError> {
        let txn = self.conn.begin().await?;
        let result: Result<asset::Model, AppError> = async {
            let existing = find_asset_for_update(&txn, id).await?;
            if existing.status != AssetStatus::Allocated {
                return Err(AppError::Conflict(format!(
                    "Asset is {} and cannot be released",
                    existing.status
                )));
            }

            let mut active: asset::ActiveModel = existing.into();
            active.status = Set(AssetStatus::Available);
            active.allocated_to = Set(None);
            Ok(active.update(&txn).await?)
        }
        .await;
        finish(txn, result).await
    }
}

pub(crate) async fn find_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

pub(crate) async fn find_asset<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<asset::Model, AppError> {
    asset::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Asset not found".into()))
}

async fn find_asset_for_update<C: ConnectionTrait>(
    txn: &C,
    id: i32,
) -> Result<asset::Model, AppError> {
    asset::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Asset not found".into()))
}
