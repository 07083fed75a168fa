use thiserror::Error;

/// Error type for token issuance.
///
/// Validation failures are not errors; they are [`ValidationOutcome`]
/// values, so callers handle every case explicitly.
///
/// [`ValidationOutcome`]: super::ValidationOutcome
#[derive(Debug, Clone, Error)]
pub enum IssueError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
