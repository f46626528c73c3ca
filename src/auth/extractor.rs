use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::SqlitePool;

use crate::auth::token;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

/// The user resolved from a stateful bearer token. Routes that take this
/// extractor reject anonymous requests with 401; activation and permission
/// checks are separate, explicit steps.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    pub fn require_activated(&self) -> Result<(), AppError> {
        if self.user.activated {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Your account must be activated to access this resource".to_string(),
            ))
        }
    }

    /// Activated-account check plus a permission lookup, in the order the
    /// route middleware chain of the management API applies them.
    pub async fn require_permission(
        &self,
        pool: &SqlitePool,
        code: &str,
    ) -> Result<(), AppError> {
        self.require_activated()?;

        let permissions = db::permissions::get_all_for_user(pool, self.user.id).await?;
        if permissions.iter().any(|p| p == code) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Your account does not have the necessary permission".to_string(),
            ))
        }
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let plaintext = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        if !token::is_well_formed(plaintext) {
            return Err(AppError::Unauthorized(
                "Invalid or expired authentication token".to_string(),
            ));
        }

        let user = db::users::find_for_token(
            &state.pool,
            token::SCOPE_AUTHENTICATION,
            &token::hash(plaintext),
        )
        .await?
        .ok_or_else(|| {
            AppError::Unauthorized("Invalid or expired authentication token".to_string())
        })?;

        Ok(AuthUser { user })
    }
}
