//! signed-submit library exports
//!
//! Builds a canonical JSON payload, signs it with HMAC-SHA256 and POSTs it
//! to the submission endpoint, returning the server-issued receipt.

pub mod client;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod payload;
pub mod resolve;
pub mod signing;

// Re-exports
pub use client::{Receipt, SubmissionClient, Submitter};
pub use config::ClientConfig;
pub use error::{SubmitError, SubmitResult};
pub use orchestrator::{Orchestrator, SignedSubmission};
pub use payload::Payload;
pub use resolve::{EnvSource, FieldOverrides, ProcessEnv};
pub use signing::{sign, verify_signature_header, Signature, SigningSecret};
