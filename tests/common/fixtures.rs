//! Test fixtures

use std::collections::HashMap;

use chrono::TimeZone;
use signed_submit::payload::FixedClock;
use signed_submit::SigningSecret;

/// Secret shared by tests and mock servers
pub const TEST_SECRET: &str = "integration-test-secret";

/// Timestamp produced by [`fixed_clock`]
pub const FIXED_TIMESTAMP: &str = "2026-01-06T16:59:37.571Z";

/// Canonical body for the applicant in [`applicant_env`] at [`FIXED_TIMESTAMP`]
pub const APPLICANT_BODY: &str = r#"{"action_run_link":"run","email":"a@x.com","name":"A","repository_link":"repo","resume_link":"r","timestamp":"2026-01-06T16:59:37.571Z"}"#;

pub fn test_secret() -> SigningSecret {
    SigningSecret::new(TEST_SECRET).expect("non-empty secret")
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(
        chrono::Utc
            .timestamp_millis_opt(1_767_718_777_571)
            .single()
            .expect("valid instant"),
    )
}

/// Environment with every field set explicitly
pub fn applicant_env() -> HashMap<String, String> {
    env_from(&[
        ("B12_NAME", "A"),
        ("B12_EMAIL", "a@x.com"),
        ("B12_RESUME_LINK", "r"),
        ("B12_REPOSITORY_LINK", "repo"),
        ("B12_ACTION_RUN_LINK", "run"),
    ])
}

/// Environment as seen inside a GitHub Actions job
pub fn github_actions_env() -> HashMap<String, String> {
    env_from(&[
        ("B12_NAME", "Ada Lovelace"),
        ("B12_EMAIL", "ada@example.com"),
        ("B12_RESUME_LINK", "https://example.com/ada.pdf"),
        ("GITHUB_SERVER_URL", "https://github.com"),
        ("GITHUB_REPOSITORY", "ada/engine"),
        ("GITHUB_RUN_ID", "424242"),
    ])
}

pub fn env_from(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
