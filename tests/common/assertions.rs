//! Custom test assertions for signed submissions

use serde_json::Value;
use signed_submit::{verify_signature_header, SigningSecret};

/// Assert that a body is compact JSON with sorted keys and string values
pub fn assert_canonical_body(body: &str) {
    let value: Value = serde_json::from_str(body).expect("body should be JSON");
    let object = value.as_object().expect("body should be a JSON object");

    // Keys must appear in the raw text in ascending byte order
    let positions: Vec<usize> = object
        .keys()
        .map(|k| body.find(&format!("\"{}\":", k)).expect("key present in body"))
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "keys should be in ascending order"
    );

    assert!(
        object.values().all(Value::is_string),
        "all values should be strings"
    );
    assert!(!body.contains(": "), "no space after ':'");
    assert!(!body.contains(", "), "no space after ','");
    assert!(!body.contains('\n'), "no newlines");
}

/// Assert that a header is `sha256=<64 lowercase hex>` and verifies
pub fn assert_valid_signature(body: &[u8], secret: &SigningSecret, header: &str) {
    let hex = header
        .strip_prefix("sha256=")
        .expect("header should start with sha256=");
    assert_eq!(hex.len(), 64, "digest should be 64 hex characters");
    assert!(
        hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')),
        "digest should be lowercase hex"
    );
    assert!(
        verify_signature_header(body, secret, header),
        "signature should verify against the body"
    );
}
