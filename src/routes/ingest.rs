use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use crate::db;
use crate::error::AppError;
use crate::models::SubmissionPayload;
use crate::state::SharedState;

/// Public submit endpoint. Accepts the two-field JSON payload as-is: both
/// fields may be empty and no validation is applied. Callers only ever look
/// at the status class of the response.
pub async fn submit_form(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<SubmissionPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    state
        .ingest_limiter
        .check(
            addr.ip(),
            state.config.rate_limit,
            state.config.rate_window_secs,
        )
        .map_err(AppError::RateLimited)?;

    let submission =
        db::submissions::create(&state.pool, &payload.category, &payload.text).await?;

    tracing::debug!(id = submission.id, "submission stored");

    Ok((StatusCode::CREATED, Json(json!({ "submission": submission }))))
}
