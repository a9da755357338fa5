//! Submission error types

use thiserror::Error;

/// Errors surfaced by a submission run
///
/// None of these are retried. Protocol variants carry the raw response body
/// so a failed run can be diagnosed from the message alone.
#[derive(Debug, Error)]
pub enum SubmitError {
    // ========== Local Errors ==========
    /// Payload violates the flat string-only mapping
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),

    // ========== Transport Errors ==========
    /// Connection, DNS or TLS failure
    #[error("network error: {0}")]
    Network(String),

    /// Request did not complete in time
    #[error("timeout after {0} seconds")]
    Timeout(u64),

    // ========== Protocol Errors ==========
    /// Server answered with a non-2xx status
    #[error("server returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Response body is not JSON
    #[error("invalid JSON in response: {reason}: {body}")]
    InvalidJson { reason: String, body: String },

    /// Response JSON lacks a usable receipt
    #[error("No receipt in response: {0}")]
    MissingReceipt(String),
}

impl SubmitError {
    /// True for failures where the HTTP exchange never completed
    pub fn is_transport(&self) -> bool {
        matches!(self, SubmitError::Network(_) | SubmitError::Timeout(_))
    }

    /// True when the server answered but the answer is unusable
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            SubmitError::HttpStatus { .. }
                | SubmitError::InvalidJson { .. }
                | SubmitError::MissingReceipt(_)
        )
    }
}

/// Submission result type alias
pub type SubmitResult<T> = Result<T, SubmitError>;
