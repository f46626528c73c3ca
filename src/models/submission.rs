use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The wire shape of a form submission: two free-form strings, both of which
/// may be empty. Shared by the client and the ingest endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub category: String,
    pub text: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub category: String,
    pub text: String,
    pub version: i64,
}
