//! Canonical JSON encoding
//!
//! The signed bytes are a flat JSON object with keys in ascending byte order,
//! compact separators and raw (unescaped) non-ASCII text. Any verifier that
//! re-encodes the same mapping with this rule gets the same bytes, so the
//! signature can be checked independently of field insertion order.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{SubmitError, SubmitResult};

/// Encode a flat string mapping into canonical bytes
///
/// `BTreeMap` iteration order is byte order for UTF-8 keys, and
/// `serde_json` writes no whitespace in its compact form.
pub fn encode_fields<K, V>(fields: &BTreeMap<K, V>) -> SubmitResult<Vec<u8>>
where
    K: AsRef<str> + Ord,
    V: AsRef<str>,
{
    let sorted: BTreeMap<&str, &str> = fields
        .iter()
        .map(|(k, v)| (k.as_ref(), v.as_ref()))
        .collect();

    serde_json::to_vec(&sorted).map_err(|e| SubmitError::Encoding(e.to_string()))
}

/// Encode an arbitrary JSON value, rejecting anything that is not a flat
/// object of strings
pub fn encode_value(value: &Value) -> SubmitResult<Vec<u8>> {
    let object = value
        .as_object()
        .ok_or_else(|| SubmitError::Encoding(format!("expected object, got {}", kind(value))))?;

    let mut fields = BTreeMap::new();
    for (key, v) in object {
        let s = v.as_str().ok_or_else(|| {
            SubmitError::Encoding(format!("field '{}' must be a string, got {}", key, kind(v)))
        })?;
        fields.insert(key.as_str(), s);
    }

    encode_fields(&fields)
}

/// Parse canonical bytes back into a JSON value
pub fn decode(bytes: &[u8]) -> SubmitResult<Value> {
    serde_json::from_slice(bytes).map_err(|e| SubmitError::Encoding(e.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
