//! Error types for the confcal pipeline.

use thiserror::Error;

/// Errors that abort an export run.
///
/// Missing optional data (rooms, speakers, streams, abstracts) is never an
/// error; it resolves to an empty string instead.
#[derive(Error, Debug)]
pub enum ConfcalError {
    #[error("Fetch failed with HTTP {status}: {body}")]
    Fetch { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed agenda entry '{id}': {reason}")]
    MalformedEntry { id: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
}

impl From<serde_json::Error> for ConfcalError {
    fn from(err: serde_json::Error) -> Self {
        ConfcalError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for ConfcalError {
    fn from(err: reqwest::Error) -> Self {
        ConfcalError::Http(err.to_string())
    }
}

/// Result type alias for confcal operations.
pub type ConfcalResult<T> = Result<T, ConfcalError>;
