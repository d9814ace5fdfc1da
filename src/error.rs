//! Error types for the grading client.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for grading client operations
pub type Result<T> = std::result::Result<T, GraderError>;

/// Errors surfaced by [`crate::GradingClient`]. Nothing is retried or logged
/// locally; every failure goes straight back to the caller.
#[derive(Error, Debug)]
pub enum GraderError {
    /// Credential could not be resolved or is unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// The API answered with a non-success status
    #[error("Canvas API returned {status}: {body}")]
    RemoteApi { status: StatusCode, body: String },

    /// Network-level failure (DNS, refused connection, TLS, ...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Reading the credential file failed for a reason other than absence
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A success response did not carry the expected JSON
    #[error("unexpected response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl GraderError {
    /// Status code of a remote rejection, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GraderError::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }
}
