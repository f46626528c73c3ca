use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use dashmap::DashMap;
use serde_json::json;

use crate::state::SharedState;

/// Request counters published at /v1/metrics.
pub struct Metrics {
    total_requests_received: AtomicU64,
    total_responses_sent: AtomicU64,
    total_processing_time_us: AtomicU64,
    responses_by_status: DashMap<u16, u64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            total_requests_received: AtomicU64::new(0),
            total_responses_sent: AtomicU64::new(0),
            total_processing_time_us: AtomicU64::new(0),
            responses_by_status: DashMap::new(),
        }
    }

    pub fn record(&self, status: u16, elapsed_us: u64) {
        self.total_responses_sent.fetch_add(1, Ordering::Relaxed);
        self.total_processing_time_us
            .fetch_add(elapsed_us, Ordering::Relaxed);
        *self.responses_by_status.entry(status).or_insert(0) += 1;
    }

    pub fn snapshot(&self) -> serde_json::Value {
        let by_status: std::collections::HashMap<String, u64> = self
            .responses_by_status
            .iter()
            .map(|entry| (entry.key().to_string(), *entry.value()))
            .collect();

        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "total_requests_received": self.total_requests_received.load(Ordering::Relaxed),
            "total_responses_sent": self.total_responses_sent.load(Ordering::Relaxed),
            "total_processing_time_us": self.total_processing_time_us.load(Ordering::Relaxed),
            "responses_by_status": by_status,
        })
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware wrapping every request with the counters above.
pub async fn track(State(state): State<SharedState>, req: Request, next: Next) -> Response {
    state
        .metrics
        .total_requests_received
        .fetch_add(1, Ordering::Relaxed);

    let started = Instant::now();
    let response = next.run(req).await;

    let elapsed_us = started.elapsed().as_micros() as u64;
    state
        .metrics
        .record(response.status().as_u16(), elapsed_us);

    response
}

pub async fn show(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(state.metrics.snapshot())
}
