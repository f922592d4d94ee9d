use common::RequestStatus;
use sea_orm::sea_query::LockType;
use sea_orm::*;

use super::catalog::find_asset;
use crate::database::finish;
use crate::entity::{request, request_history, user};
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::models::request::{NewRequest, RequestEdit, StatusChange, validate_asset_for_type};

const CREATED_COMMENT: &str = "Request created";

/// Request lifecycle: filing, editing, review and removal.
///
/// Every status a request takes, including the initial one, is written to
/// `request_history` in the same transaction as the change itself.
pub struct RequestService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> RequestService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<request::Model>, AppError> {
        request::Entity::find()
            .order_by_asc(request::Column::Id)
            .all(self.conn)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to load requests: {}", e)))
    }

    pub async fn get(&self, id: i32) -> Result<request::Model, AppError> {
        find_request(self.conn, id).await
    }

    /// History entries of a request, oldest first.
    pub async fn history(&self, id: i32) -> Result<Vec<request_history::Model>, AppError> {
        find_request(self.conn, id).await?;
        Ok(request_history::Entity::find()
            .filter(request_history::Column::RequestId.eq(id))
            .order_by_asc(request_history::Column::Id)
            .all(self.conn)
            .await?)
    }
}

impl<'a, C: ConnectionTrait + TransactionTrait> RequestService<'a, C> {
    /// File a request for the user named in `new`.
    pub async fn create(
        &self,
        actor: &AuthUser,
        new: NewRequest,
    ) -> Result<request::Model, AppError> {
        if new.status != RequestStatus::Pending && !actor.is_manager() {
            return Err(AppError::PermissionDenied);
        }

        let txn = self.conn.begin().await?;
        let result: Result<request::Model, AppError> = async {
            let owner = user::Entity::find()
                .filter(user::Column::Username.eq(&new.username))
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".into()))?;
            actor.require_owner_or_manager(owner.id)?;

            if let Some(asset_id) = new.asset_id {
                find_asset(&txn, asset_id).await?;
            }

            let created = request::ActiveModel {
                user_id: Set(owner.id),
                asset_id: Set(new.asset_id),
                request_type: Set(new.request_type),
                reason: Set(new.reason),
                quantity: Set(new.quantity),
                urgency: Set(new.urgency),
                status: Set(new.status),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            append_history(&txn, created.id, created.status, Some(CREATED_COMMENT.into())).await?;
            Ok(created)
        }
        .await;
        finish(txn, result).await
    }

    /// Replace the type, reason and quantity of a request. Status is untouched.
    pub async fn update(
        &self,
        actor: &AuthUser,
        id: i32,
        edit: RequestEdit,
    ) -> Result<request::Model, AppError> {
        let txn = self.conn.begin().await?;
        let result: Result<request::Model, AppError> = async {
            let existing = find_request_for_update(&txn, id).await?;
            actor.require_owner_or_manager(existing.user_id)?;
            validate_asset_for_type(edit.request_type, existing.asset_id)?;

            let mut active: request::ActiveModel = existing.into();
            active.request_type = Set(edit.request_type);
            active.reason = Set(Some(edit.reason));
            active.quantity = Set(edit.quantity);
            Ok(active.update(&txn).await?)
        }
        .await;
        finish(txn, result).await
    }

    /// Move a `Pending` request to `Approved` or `Rejected`.
    pub async fn transition(
        &self,
        actor: &AuthUser,
        id: i32,
        change: StatusChange,
    ) -> Result<request::Model, AppError> {
        actor.require_manager()?;

        let txn = self.conn.begin().await?;
        let result: Result<request::Model, AppError> = async {
            let existing = find_request_for_update(&txn, id).await?;
            if !existing.status.can_transition_to(change.status) {
                return Err(AppError::Conflict(format!(
                    "Cannot change request status from {} to {}",
                    existing.status, change.status
                )));
            }

            let mut active: request::ActiveModel = existing.into();
            active.status = Set(change.status);
            let updated = active.update(&txn).await?;

            append_history(&txn, updated.id, updated.status, change.comment).await?;
            Ok(updated)
        }
        .await;
        finish(txn, result).await
    }

    /// Delete a request together with its history.
    pub async fn delete(&self, actor: &AuthUser, id: i32) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        let result: Result<(), AppError> = async {
            let existing = find_request_for_update(&txn, id).await?;
            actor.require_owner_or_manager(existing.user_id)?;

            request_history::Entity::delete_many()
                .filter(request_history::Column::RequestId.eq(id))
                .exec(&txn)
                .await?;
            request::Entity::delete_by_id(id).exec(&txn).await?;
            Ok(())
        }
        .await;
        finish(txn, result).await
    }
}

async fn append_history<C: ConnectionTrait>(
    db: &C,
    request_id: i32,
    status: RequestStatus,
    comment: Option<String>,
) -> Result<request_history::Model, DbErr> {
    request_history::ActiveModel {
        request_id: Set(request_id),
        status: Set(status),
        comment: Set(comment),
        ..Default::default()
    }
    .insert(db)
    .await
}

async fn find_request<C: ConnectionTrait>(db: &C, id: i32) -> Result<request::Model, AppError> {
    request::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".into()))
}

async fn find_request_for_update<C: ConnectionTrait>(
    txn: &C,
    id: i32,
) -> Result<request::Model, AppError> {
    request::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found".into()))
}
