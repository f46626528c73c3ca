pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod state;
pub mod validation;

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::Mailer;
use crate::metrics::Metrics;
use crate::rate_limit::IngestRateLimiter;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: SqlitePool, config: Config) -> Router {
    let mailer = config.smtp.as_ref().and_then(|smtp| match Mailer::new(smtp) {
        Ok(mailer) => {
            tracing::info!("SMTP configured");
            Some(Arc::new(mailer))
        }
        Err(e) => {
            tracing::warn!("SMTP not available: {e}");
            None
        }
    });

    let cors_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(cors_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        mailer,
        ingest_limiter: IngestRateLimiter::new(),
        metrics: Metrics::new(),
    });

    // The last layer added runs first. Metrics sit outside panic recovery so
    // converted 500s are still counted.
    Router::new()
        .merge(routes::api_routes())
        .merge(routes::ingest_routes())
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            metrics::track,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}

fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("Handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(serde_json::json!({ "error": "Internal server error" })),
    )
        .into_response()
}
