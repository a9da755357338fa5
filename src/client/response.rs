//! Submission response parsing

use serde_json::Value;

use crate::error::{SubmitError, SubmitResult};

/// Server-issued acknowledgement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Opaque receipt string, never empty
    pub receipt: String,
    /// `success` flag as reported by the server, if present
    pub success: Option<bool>,
}

/// Extract the receipt from a 2xx response body
///
/// Expected shape: `{"success": <bool>, "receipt": <string>}`. Only `receipt`
/// decides the outcome; it must be a non-empty string.
pub fn parse_receipt(body: &str) -> SubmitResult<Receipt> {
    let json: Value = serde_json::from_str(body).map_err(|e| SubmitError::InvalidJson {
        reason: e.to_string(),
        body: body.to_string(),
    })?;

    let receipt = json
        .get("receipt")
        .and_then(Value::as_str)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| SubmitError::MissingReceipt(body.to_string()))?;

    Ok(Receipt {
        receipt: receipt.to_string(),
        success: json.get("success").and_then(Value::as_bool),
    })
}
