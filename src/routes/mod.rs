pub mod health;
pub mod ingest;
pub mod submissions;
pub mod tokens;
pub mod users;

use axum::routing::{get, post, put};
use axum::Router;

use crate::metrics;
use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/v1/healthcheck", get(health::healthcheck))
        // Submissions management
        .route(
            "/v1/submissions",
            get(submissions::list).post(submissions::create),
        )
        .route(
            "/v1/submissions/{id}",
            get(submissions::get)
                .put(submissions::update)
                .delete(submissions::delete),
        )
        // Users
        .route("/v1/users", post(users::register))
        .route("/v1/users/activated", put(users::activate))
        .route("/v1/users/password", put(users::update_password))
        // Tokens
        .route(
            "/v1/tokens/authentication",
            post(tokens::create_authentication_token),
        )
        .route(
            "/v1/tokens/password-reset",
            post(tokens::create_password_reset_token),
        )
        // Metrics
        .route("/v1/metrics", get(metrics::show))
}

pub fn ingest_routes() -> Router<SharedState> {
    Router::new().route("/submit-form", post(ingest::submit_form))
}
