//! Blocking HTTP submission client

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::client::response::{parse_receipt, Receipt};
use crate::client::Submitter;
use crate::config::ClientConfig;
use crate::error::{SubmitError, SubmitResult};
use crate::signing::Signature;

/// Body content type; the charset is part of the contract
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Header carrying `sha256=<hex>`
pub const SIGNATURE_HEADER: &str = "X-Signature-256";

/// Submission client over a blocking `reqwest` client
pub struct SubmissionClient {
    /// Endpoint URL
    url: String,

    /// HTTP client for blocking requests
    client: reqwest::blocking::Client,

    /// Timeout
    timeout: Duration,
}

impl SubmissionClient {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> SubmitResult<Self> {
        config.validate()?;
        let timeout = Duration::from_secs(config.timeout_secs);

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        Ok(Self {
            url: config.url.clone(),
            client,
            timeout,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> SubmitError {
        if e.is_timeout() {
            SubmitError::Timeout(self.timeout.as_secs())
        } else {
            SubmitError::Network(e.to_string())
        }
    }
}

impl Submitter for SubmissionClient {
    fn submit(&self, body: &[u8], signature: &Signature) -> SubmitResult<Receipt> {
        tracing::debug!(url = %self.url, bytes = body.len(), "Submitting payload");

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(SIGNATURE_HEADER, signature.header_value())
            .body(body.to_vec())
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let bytes = response.bytes().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::warn!(url = %self.url, status = %status, "Submission rejected");
            return Err(SubmitError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let text = std::str::from_utf8(&bytes).map_err(|e| SubmitError::InvalidJson {
            reason: format!("response body is not UTF-8: {}", e),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })?;
        let receipt = parse_receipt(text)?;

        if receipt.success == Some(false) {
            tracing::warn!(url = %self.url, "Server reported success=false alongside a receipt");
        }
        tracing::info!(url = %self.url, status = %status, "Submission accepted");

        Ok(receipt)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
