use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::email::Mailer;
use crate::metrics::Metrics;
use crate::rate_limit::IngestRateLimiter;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub mailer: Option<Arc<Mailer>>,
    pub ingest_limiter: IngestRateLimiter,
    pub metrics: Metrics,
}
