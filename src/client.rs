use crate::models::SubmissionPayload;

/// Fixed server path that receives submissions.
pub const SUBMIT_PATH: &str = "/submit-form";

/// How a submission ended, as far as the submitter is concerned. The response
/// body is never read; only the status class is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server answered with a 2xx status.
    Accepted,
    /// The server answered with anything else. No distinction is made between
    /// non-success status codes.
    Rejected(reqwest::StatusCode),
}

#[derive(Debug)]
pub enum SubmitError {
    /// The HTTP client could not be constructed.
    Client(reqwest::Error),
    /// The request never produced a response (connection refused, DNS
    /// failure, connection reset mid-flight).
    Transport(reqwest::Error),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Client(err) => write!(f, "failed to build HTTP client: {err}"),
            SubmitError::Transport(err) => write!(f, "failed to submit form data: {err}"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Client(err) | SubmitError::Transport(err) => Some(err),
        }
    }
}

/// Submits form payloads to a formsink server.
///
/// The submitter is constructed once with the server's base URL and owns its
/// connection pool; dropping it tears the pool down. Each `submit` call is
/// independent: there is no retry, no de-duplication, and no in-flight guard,
/// so concurrent calls race freely. No request timeout is configured; the
/// transport's own behavior applies.
pub struct FormSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl FormSubmitter {
    pub fn new(base_url: &str) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(SubmitError::Client)?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SUBMIT_PATH),
        })
    }

    /// Serialize the payload and POST it. Returns the coarse outcome to the
    /// caller; the host decides how to surface it.
    pub async fn submit(&self, form: &SubmissionPayload) -> Result<SubmitOutcome, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Error submitting form data: {e}");
                SubmitError::Transport(e)
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("Form data submitted successfully");
            Ok(SubmitOutcome::Accepted)
        } else {
            tracing::info!(%status, "Form data submission failed");
            Ok(SubmitOutcome::Rejected(status))
        }
    }
}
