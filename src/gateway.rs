//! Submission gateway. Posts the finished record to the onboarding service
//! and folds transport outcomes into one error type the flow can retry on.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::record::OnboardingRecord;

/// Production endpoint for onboarding submissions.
pub const DEFAULT_ENDPOINT: &str = "https://saturndigitalbackend.onrender.com/api";

/// Ceiling on a submission round trip, body included.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("submission attempted before the application was complete")]
    NotReady,
    #[error("submission rejected with status {status}")]
    Rejected { status: u16 },
    #[error("submission timed out")]
    TimedOut,
    #[error("could not reach the onboarding service: {0}")]
    Transport(String),
    #[error("unexpected response from the onboarding service: {0}")]
    Unexpected(String),
}

/// What the service returned for an accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub status: u16,
    pub body: Value,
}

/// Seam between the flow and the wire. The flow only ever sees this trait;
/// tests drive it with stubs and the CLI hands it the HTTP gateway.
pub trait RecordSubmitter {
    fn submit(&self, record: &OnboardingRecord) -> Result<SubmissionReceipt, SubmissionError>;
}

/// HTTP implementation over the onboarding API.
pub struct SubmissionGateway {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl SubmissionGateway {
    /// Builds a gateway with a hard timeout covering connect, send, and
    /// body read.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmissionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SubmissionError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, SubmissionError> {
        Self::new(&config.endpoint, config.submit_timeout())
    }
}

impl RecordSubmitter for SubmissionGateway {
    fn submit(&self, record: &OnboardingRecord) -> Result<SubmissionReceipt, SubmissionError> {
        let correlation = Uuid::new_v4();
        debug!(%correlation, endpoint = %self.endpoint, "submitting onboarding record");

        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .map_err(|err| {
                if err.is_timeout() {
                    SubmissionError::TimedOut
                } else {
                    SubmissionError::Transport(err.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            warn!(%correlation, status, "submission rejected");
            return Err(SubmissionError::Rejected { status });
        }

        // A 2xx with an unparseable body still counts as a failure; the
        // caller keeps the record and may retry.
        let body: Value = response.json().map_err(|err| {
            if err.is_timeout() {
                SubmissionError::TimedOut
            } else {
                SubmissionError::Unexpected(err.to_string())
            }
        })?;

        debug!(%correlation, status, "submission accepted");
        Ok(SubmissionReceipt { status, body })
    }
}
