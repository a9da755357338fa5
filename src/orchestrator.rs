//! One submission run: resolve, encode, sign, submit

use crate::client::Submitter;
use crate::error::SubmitResult;
use crate::payload::{timestamp_now, Clock, Payload};
use crate::resolve::{ApplicantFields, EnvSource, FieldOverrides};
use crate::signing::{sign, Signature, SigningSecret};

/// Payload signed and ready to send
#[derive(Debug, Clone)]
pub struct SignedSubmission {
    pub payload: Payload,
    /// Canonical bytes; exactly what is signed and sent
    pub body: Vec<u8>,
    pub signature: Signature,
}

impl SignedSubmission {
    /// Canonical body as text
    pub fn body_str(&self) -> &str {
        // Produced by serde_json from `String`s, so always valid UTF-8
        std::str::from_utf8(&self.body).unwrap_or_default()
    }
}

/// Inputs of a run, gathered once at start
pub struct Orchestrator<'a> {
    env: &'a dyn EnvSource,
    overrides: FieldOverrides,
    clock: &'a dyn Clock,
    secret: SigningSecret,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        env: &'a dyn EnvSource,
        overrides: FieldOverrides,
        clock: &'a dyn Clock,
        secret: SigningSecret,
    ) -> Self {
        Self {
            env,
            overrides,
            clock,
            secret,
        }
    }

    /// Resolve fields and stamp the payload
    pub fn build_payload(&self) -> Payload {
        let fields = ApplicantFields::resolve(self.env, &self.overrides);

        for field in fields.placeholders() {
            tracing::warn!(field = field, "Field not configured, using placeholder");
        }

        fields.into_payload(timestamp_now(self.clock))
    }

    /// Build, encode and sign without sending anything
    pub fn prepare(&self) -> SubmitResult<SignedSubmission> {
        let payload = self.build_payload();
        let body = payload.canonical_bytes()?;
        let signature = sign(&body, &self.secret);

        tracing::debug!(
            bytes = body.len(),
            timestamp = %payload.timestamp,
            "Payload encoded and signed"
        );

        Ok(SignedSubmission {
            payload,
            body,
            signature,
        })
    }

    /// Full run; returns the receipt string on success
    pub fn run(&self, submitter: &dyn Submitter) -> SubmitResult<String> {
        let signed = self.prepare()?;

        tracing::info!(url = %submitter.endpoint(), "Sending submission");
        let receipt = submitter.submit(&signed.body, &signed.signature)?;

        Ok(receipt.receipt)
    }
}
