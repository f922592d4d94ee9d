use sea_orm::*;

use crate::entity::user;
use crate::error::AppError;
use crate::models::auth::NewUser;
use crate::utils::{hash, jwt};

pub struct AuthService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> AuthService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Create an account. The password is stored only as an argon2 hash.
    pub async fn register(&self, new_user: NewUser) -> Result<user::Model, AppError> {
        let taken = user::Entity::find()
            .filter(user::Column::Username.eq(&new_user.username))
            .one(self.conn)
            .await?
            .is_some();
        if taken {
            return Err(AppError::UsernameTaken);
        }

        let hash = hash::hash_password(&new_user.password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

        let model = user::ActiveModel {
            username: Set(new_user.username),
            password: Set(hash),
            role: Set(new_user.role),
            email: Set(new_user.email),
            ..Default::default()
        };

        model.insert(self.conn).await.map_err(map_user_insert_error)
    }

    /// Check credentials and issue a signed token.
    ///
    /// An unknown username and a wrong password fail identically.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        secret: &str,
        ttl_secs: u64,
    ) -> Result<String, AppError> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.conn)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let is_valid = hash::verify_password(password, &user.password)
            .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        jwt::sign(user.id, &user.username, user.role, secret, ttl_secs)
            .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))
    }
}

/// Translate a failed user insert. A unique violation here means another
/// registration for the same username won the race past the pre-check.
pub fn map_user_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Registration race condition: unique constraint caught on insert");
            AppError::UsernameTaken
        }
        _ => AppError::from(err),
    }
}
