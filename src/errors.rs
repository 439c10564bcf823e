use thiserror::Error;

use crate::gateway::SubmissionError;

/// Error type that captures common onboarding failures.
#[derive(Debug, Error)]
pub enum OnboardingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),
    #[error("Configuration error: {0}")]
    Config(String),
}
