use axum::{extract::FromRequestParts, http::request::Parts};
use common::UserRole;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated user extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication.
/// Role checks happen via `require_manager()` in the handler body.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_manager(&self) -> bool {
        self.role.is_manager()
    }

    /// Returns `Ok(())` if the user holds any of the given roles.
    pub fn require_any_role(&self, roles: &[UserRole]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    /// Shorthand for the Admin / Procurement_Manager gate.
    pub fn require_manager(&self) -> Result<(), AppError> {
        self.require_any_role(UserRole::MANAGERS)
    }

    /// Managers may act on anyone's records; everyone else only on their own.
    pub fn require_owner_or_manager(&self, owner_id: i32) -> Result<(), AppError> {
        if self.user_id == owner_id || self.is_manager() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims =
            jwt::verify(token, &state.config.auth.jwt_secret).map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser {
            user_id: claims.uid,
            username: claims.sub,
            role: claims.role,
        })
    }
}
