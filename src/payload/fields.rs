//! The submission payload

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SubmitError, SubmitResult};
use crate::payload::canonical;

/// Field names, in canonical (ascending byte) order
pub const FIELD_NAMES: [&str; 6] = [
    "action_run_link",
    "email",
    "name",
    "repository_link",
    "resume_link",
    "timestamp",
];

/// Application payload
///
/// Exactly six string fields. Built once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Payload {
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub resume_link: String,
    pub repository_link: String,
    pub action_run_link: String,
}

impl Payload {
    /// View as a sorted name → value mapping
    pub fn fields(&self) -> BTreeMap<&'static str, &str> {
        BTreeMap::from([
            ("action_run_link", self.action_run_link.as_str()),
            ("email", self.email.as_str()),
            ("name", self.name.as_str()),
            ("repository_link", self.repository_link.as_str()),
            ("resume_link", self.resume_link.as_str()),
            ("timestamp", self.timestamp.as_str()),
        ])
    }

    /// Canonical bytes for signing and transmission
    pub fn canonical_bytes(&self) -> SubmitResult<Vec<u8>> {
        canonical::encode_fields(&self.fields())
    }

    /// Build from a JSON object, enforcing the six-key string-only shape
    pub fn from_value(value: &Value) -> SubmitResult<Self> {
        // Reject non-string values with the encoder's message before serde
        // reports a less specific type error.
        canonical::encode_value(value)?;

        let object = value
            .as_object()
            .ok_or_else(|| SubmitError::Encoding("payload must be an object".into()))?;
        if let Some(missing) = FIELD_NAMES.iter().find(|k| !object.contains_key(**k)) {
            return Err(SubmitError::Encoding(format!("missing field '{}'", missing)));
        }

        Self::deserialize(value).map_err(|e| SubmitError::Encoding(e.to_string()))
    }

    /// Decode canonical bytes back into a payload
    pub fn from_canonical_bytes(bytes: &[u8]) -> SubmitResult<Self> {
        Self::from_value(&canonical::decode(bytes)?)
    }
}
