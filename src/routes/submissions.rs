use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;
use crate::validation::Validator;

const PERM_READ: &str = "submissions:read";
const PERM_WRITE: &str = "submissions:write";

#[derive(Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub text: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateRequest {
    pub category: String,
    pub text: String,
}

#[derive(Deserialize)]
pub struct UpdateRequest {
    pub category: String,
    pub text: String,
    /// The version the client last saw; a stale value is a 409.
    pub version: i64,
}

fn validate_fields(category: &str, text: &str) -> Result<(), AppError> {
    let mut v = Validator::new();
    v.check(!category.is_empty(), "category", "must be provided");
    v.check(
        category.len() <= 500,
        "category",
        "must not be more than 500 bytes long",
    );
    v.check(!text.is_empty(), "text", "must be provided");
    v.finish()
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_permission(&state.pool, PERM_READ).await?;

    let filters = db::submissions::ListFilters {
        category: params.category.unwrap_or_default(),
        text: params.text.unwrap_or_default(),
    };
    let submissions = db::submissions::list(&state.pool, &filters).await?;

    Ok(Json(json!({ "submissions": submissions })))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    auth.require_permission(&state.pool, PERM_WRITE).await?;
    validate_fields(&req.category, &req.text)?;

    let submission = db::submissions::create(&state.pool, &req.category, &req.text).await?;

    Ok((StatusCode::CREATED, Json(json!({ "submission": submission }))))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_permission(&state.pool, PERM_READ).await?;

    if id < 1 {
        return Err(AppError::NotFound("Submission not found".to_string()));
    }

    let submission = db::submissions::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

    Ok(Json(json!({ "submission": submission })))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_permission(&state.pool, PERM_WRITE).await?;
    validate_fields(&req.category, &req.text)?;

    let mut submission = db::submissions::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

    submission.category = req.category;
    submission.text = req.text;
    submission.version = req.version;

    let updated = db::submissions::update(&state.pool, &submission)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(
                "Unable to update the record due to an edit conflict, please try again"
                    .to_string(),
            )
        })?;

    Ok(Json(json!({ "submission": updated })))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_permission(&state.pool, PERM_WRITE).await?;

    let removed = db::submissions::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Submission not found".to_string()));
    }

    Ok(Json(json!({ "message": "submission successfully deleted" })))
}
