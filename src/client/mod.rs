//! Signed payload submission
//!
//! Provides the blocking HTTP client and the [`Submitter`] seam the
//! orchestrator is written against.

mod http;
mod response;

pub use http::{SubmissionClient, JSON_CONTENT_TYPE, SIGNATURE_HEADER};
pub use response::{parse_receipt, Receipt};

use crate::error::SubmitResult;
use crate::signing::Signature;

/// Sends one signed body and returns the server receipt
pub trait Submitter {
    /// POST `body` with its signature header; no retries
    fn submit(&self, body: &[u8], signature: &Signature) -> SubmitResult<Receipt>;

    /// Endpoint the body is sent to, for logging
    fn endpoint(&self) -> &str;
}
