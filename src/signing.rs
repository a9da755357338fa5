//! HMAC-SHA256 request signing

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{SubmitError, SubmitResult};

type HmacSha256 = Hmac<Sha256>;

/// Header prefix naming the digest algorithm
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Pre-shared signing key
///
/// Loaded once from configuration and keyed up front, so signing itself
/// cannot fail. `Debug` never prints the key.
#[derive(Clone)]
pub struct SigningSecret {
    mac: HmacSha256,
    len: usize,
}

impl SigningSecret {
    /// Key an HMAC from raw bytes; an empty key is rejected
    pub fn new(bytes: impl Into<Vec<u8>>) -> SubmitResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SubmitError::Config("signing secret is empty".into()));
        }
        let mac = HmacSha256::new_from_slice(&bytes)
            .map_err(|e| SubmitError::Config(format!("invalid signing secret: {}", e)))?;
        Ok(Self {
            mac,
            len: bytes.len(),
        })
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningSecret(<{} bytes redacted>)", self.len)
    }
}

/// Lowercase hex HMAC-SHA256 digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(String);

impl Signature {
    /// 64 lowercase hex characters
    pub fn hex(&self) -> &str {
        &self.0
    }

    /// Value for the `X-Signature-256` header: `sha256=<hex>`
    pub fn header_value(&self) -> String {
        format!("{}{}", SIGNATURE_PREFIX, self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_value())
    }
}

fn keyed(secret: &SigningSecret) -> HmacSha256 {
    secret.mac.clone()
}

/// Sign canonical bytes
#[must_use]
pub fn sign(data: &[u8], secret: &SigningSecret) -> Signature {
    let mut mac = keyed(secret);
    mac.update(data);
    Signature(hex::encode(mac.finalize().into_bytes()))
}

/// Check a `sha256=<hex>` header against `data` in constant time
///
/// Malformed headers (wrong prefix, bad hex, wrong length) verify as false.
pub fn verify_signature_header(data: &[u8], secret: &SigningSecret, header: &str) -> bool {
    let Some(hex_digest) = header.trim().strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };
    let Ok(expected) = hex::decode(hex_digest) else {
        return false;
    };

    let mut mac = keyed(secret);
    mac.update(data);
    mac.verify_slice(&expected).is_ok()
}
