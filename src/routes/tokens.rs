use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{password, token};
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;
use crate::validation::{Validator, EMAIL_RX};

const AUTHENTICATION_TTL_HOURS: i64 = 24;
const PASSWORD_RESET_TTL_MINS: i64 = 45;

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

pub async fn create_authentication_token(
    State(state): State<SharedState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let mut v = Validator::new();
    v.check(!req.email.is_empty(), "email", "must be provided");
    v.check(
        EMAIL_RX.is_match(&req.email),
        "email",
        "must be a valid email address",
    );
    v.check(!req.password.is_empty(), "password", "must be provided");
    v.finish()?;

    let user = db::users::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid authentication credentials".to_string()))?;

    let matches =
        password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;
    if !matches {
        return Err(AppError::Unauthorized(
            "Invalid authentication credentials".to_string(),
        ));
    }

    let (plaintext, token_hash) = token::generate();
    let expiry = Utc::now() + Duration::hours(AUTHENTICATION_TTL_HOURS);
    db::tokens::create(
        &state.pool,
        user.id,
        &token_hash,
        token::SCOPE_AUTHENTICATION,
        expiry,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "authentication_token": { "token": plaintext, "expiry": expiry },
        })),
    ))
}

/// Issues a password reset token by email. The response is the same whether
/// or not the address belongs to an activated account.
pub async fn create_password_reset_token(
    State(state): State<SharedState>,
    Json(req): Json<PasswordResetRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let mut v = Validator::new();
    v.check(!req.email.is_empty(), "email", "must be provided");
    v.check(
        EMAIL_RX.is_match(&req.email),
        "email",
        "must be a valid email address",
    );
    v.finish()?;

    if let Some(user) = db::users::find_by_email(&state.pool, &req.email).await? {
        if user.activated {
            let (plaintext, token_hash) = token::generate();
            db::tokens::create(
                &state.pool,
                user.id,
                &token_hash,
                token::SCOPE_PASSWORD_RESET,
                Utc::now() + Duration::minutes(PASSWORD_RESET_TTL_MINS),
            )
            .await?;

            if let Some(mailer) = state.mailer.clone() {
                let email = user.email.clone();
                tokio::spawn(async move {
                    if let Err(e) = mailer.send_password_reset(&email, &plaintext).await {
                        tracing::error!("Failed to send password reset email: {e}");
                    }
                });
            }
        }
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "message": "an email will be sent to you containing password reset instructions",
        })),
    ))
}
