use std::collections::HashMap;

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

const ACTIVATION_TTL_HOURS: i64 = 12;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ActivateRequest {
    pub token: String,
}

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub token: String,
    pub password: String,
}

fn validate_password(v: &mut Validator, password: &str) {
    v.check(!password.is_empty(), "password", "must be provided");
    v.check(
        password.len() >= 8,
        "password",
        "must be at least 8 bytes long",
    );
    v.check(
        password.len() <= 72,
        "password",
        "must not be more than 72 bytes long",
    );
}

fn validate_token_shape(v: &mut Validator, plaintext: &str) {
    v.check(!plaintext.is_empty(), "token", "must be provided");
    v.check(
        token::is_well_formed(plaintext),
        "token",
        "must be a 64 character hex string",
    );
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let mut v = Validator::new();
    v.check(!req.name.is_empty(), "name", "must be provided");
    v.check(
        req.name.len() <= 500,
        "name",
        "must not be more than 500 bytes long",
    );
    v.check(!req.email.is_empty(), "email", "must be provided");
    v.check(
        EMAIL_RX.is_match(&req.email),
        "email",
        "must be a valid email address",
    );
    validate_password(&mut v, &req.password);
    v.finish()?;

    let password_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let user = match db::users::create(&state.pool, &req.name, &req.email, &password_hash).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(AppError::Validation(HashMap::from([(
                "email".to_string(),
                "a user with this email address already exists".to_string(),
            )])));
        }
        Err(err) => return Err(err.into()),
    };

    db::permissions::add_for_user(&state.pool, user.id, "submissions:read").await?;

    let (plaintext, token_hash) = token::generate();
    db::tokens::create(
        &state.pool,
        user.id,
        &token_hash,
        token::SCOPE_ACTIVATION,
        Utc::now() + Duration::hours(ACTIVATION_TTL_HOURS),
    )
    .await?;

    // Delivery happens off the request path; registration does not wait for
    // the SMTP round-trip.
    if let Some(mailer) = state.mailer.clone() {
        let email = user.email.clone();
        let name = user.name.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_welcome(&email, &name, &plaintext).await {
                tracing::error!("Failed to send welcome email: {e}");
            }
        });
    }

    Ok((StatusCode::ACCEPTED, Json(json!({ "user": user }))))
}

pub async fn activate(
    State(state): State<SharedState>,
    Json(req): Json<ActivateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut v = Validator::new();
    validate_token_shape(&mut v, &req.token);
    v.finish()?;

    let mut user = db::users::find_for_token(
        &state.pool,
        token::SCOPE_ACTIVATION,
        &token::hash(&req.token),
    )
    .await?
    .ok_or_else(|| {
        AppError::Validation(HashMap::from([(
            "token".to_string(),
            "invalid or expired activation token".to_string(),
        )]))
    })?;

    user.activated = true;
    let user = db::users::update(&state.pool, &user).await?.ok_or_else(|| {
        AppError::Conflict(
            "Unable to update the record due to an edit conflict, please try again".to_string(),
        )
    })?;

    db::tokens::delete_all_for_user(&state.pool, token::SCOPE_ACTIVATION, user.id).await?;

    Ok(Json(json!({ "user": user })))
}

pub async fn update_password(
    State(state): State<SharedState>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut v = Validator::new();
    validate_token_shape(&mut v, &req.token);
    validate_password(&mut v, &req.password);
    v.finish()?;

    let mut user = db::users::find_for_token(
        &state.pool,
        token::SCOPE_PASSWORD_RESET,
        &token::hash(&req.token),
    )
    .await?
    .ok_or_else(|| {
        AppError::Validation(HashMap::from([(
            "token".to_string(),
            "invalid or expired password reset token".to_string(),
        )]))
    })?;

    user.password_hash = password::hash(&req.password).map_err(AppError::Internal)?;
    let user = db::users::update(&state.pool, &user).await?.ok_or_else(|| {
        AppError::Conflict(
            "Unable to update the record due to an edit conflict, please try again".to_string(),
        )
    })?;

    db::tokens::delete_all_for_user(&state.pool, token::SCOPE_PASSWORD_RESET, user.id).await?;

    Ok(Json(json!({ "message": "your password was successfully reset" })))
}
