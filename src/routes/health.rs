use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::state::SharedState;

pub async fn healthcheck(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "available",
        "system_info": {
            "environment": state.config.env,
            "version": env!("CARGO_PKG_VERSION"),
        },
    }))
}
