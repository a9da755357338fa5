//! Client configuration

use std::path::Path;

use crate::error::{SubmitError, SubmitResult};
use crate::signing::SigningSecret;

/// Default submission endpoint
pub const DEFAULT_SUBMISSION_URL: &str = "https://b12.io/apply/submission";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_SUBMIT_URL: &str = "SUBMIT_URL";
pub const ENV_SUBMIT_TIMEOUT_SECS: &str = "SUBMIT_TIMEOUT_SECS";

/// Submission client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Endpoint receiving the signed POST
    pub url: String,
    /// Bound on the whole HTTP exchange
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SUBMISSION_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Load from environment variables
    ///
    /// Unset or blank variables keep the defaults. A timeout that is not a
    /// whole number of seconds is an error.
    pub fn from_env() -> SubmitResult<Self> {
        let mut config = Self::default();

        if let Some(url) = env_value(ENV_SUBMIT_URL) {
            config.url = url.trim().to_string();
        }
        if let Some(raw) = env_value(ENV_SUBMIT_TIMEOUT_SECS) {
            config.timeout_secs = parse_timeout(&raw)?;
        }

        Ok(config)
    }

    /// Apply command-line values on top of the loaded configuration
    pub fn with_overrides(mut self, url: Option<&str>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = url {
            self.url = url.trim().to_string();
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }

    /// Reject settings the client cannot run with
    pub fn validate(&self) -> SubmitResult<()> {
        if self.url.trim().is_empty() {
            return Err(SubmitError::Config("submission URL is empty".into()));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(SubmitError::Config(format!(
                "submission URL must be http(s): {}",
                self.url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(SubmitError::Config("timeout must be at least 1 second".into()));
        }
        Ok(())
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_timeout(raw: &str) -> SubmitResult<u64> {
    raw.trim().parse().map_err(|_| {
        SubmitError::Config(format!(
            "{} must be a whole number of seconds, got {:?}",
            ENV_SUBMIT_TIMEOUT_SECS, raw
        ))
    })
}

/// Load the signing secret from an inline value or a file
///
/// Exactly one source must be given. File contents have trailing line
/// endings stripped so `echo secret > file` works.
pub fn load_signing_secret(
    inline: Option<&str>,
    file: Option<&Path>,
) -> SubmitResult<SigningSecret> {
    match (inline, file) {
        (Some(_), Some(_)) => Err(SubmitError::Config(
            "set either a signing secret or a signing secret file, not both".into(),
        )),
        (Some(value), None) => SigningSecret::new(value.as_bytes().to_vec()),
        (None, Some(path)) => {
            let mut bytes = std::fs::read(path).map_err(|e| {
                SubmitError::Config(format!(
                    "cannot read signing secret file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            while matches!(bytes.last(), Some(b'\n' | b'\r')) {
                bytes.pop();
            }
            SigningSecret::new(bytes)
        }
        (None, None) => Err(SubmitError::Config(
            "signing secret not configured (SUBMIT_SIGNING_SECRET or SUBMIT_SIGNING_SECRET_FILE)"
                .into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    // ========== ClientConfig Tests ==========

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "https://b12.io/apply/submission");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_client_config_from_env_empty() {
        std::env::remove_var("SUBMIT_URL");
        std::env::remove_var("SUBMIT_TIMEOUT_SECS");

        assert_eq!(ClientConfig::from_env().unwrap(), ClientConfig::default());
    }

    #[test]
    #[serial]
    fn test_client_config_from_env_values() {
        std::env::set_var("SUBMIT_URL", " http://127.0.0.1:9999/submit ");
        std::env::set_var("SUBMIT_TIMEOUT_SECS", "5");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.url, "http://127.0.0.1:9999/submit");
        assert_eq!(config.timeout_secs, 5);

        std::env::remove_var("SUBMIT_URL");
        std::env::remove_var("SUBMIT_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_client_config_from_env_blank_keeps_defaults() {
        std::env::set_var("SUBMIT_URL", "  ");
        std::env::set_var("SUBMIT_TIMEOUT_SECS", "");

        assert_eq!(ClientConfig::from_env().unwrap(), ClientConfig::default());

        std::env::remove_var("SUBMIT_URL");
        std::env::remove_var("SUBMIT_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_client_config_from_env_timeout_invalid() {
        std::env::set_var("SUBMIT_TIMEOUT_SECS", "soon");

        match ClientConfig::from_env() {
            Err(SubmitError::Config(msg)) => assert!(msg.contains("SUBMIT_TIMEOUT_SECS")),
            other => panic!("Expected Config error, got {:?}", other),
        }

        std::env::remove_var("SUBMIT_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_overrides_win_over_env() {
        std::env::set_var("SUBMIT_URL", "http://127.0.0.1:9999/env");
        std::env::set_var("SUBMIT_TIMEOUT_SECS", "5");

        let config = ClientConfig::from_env()
            .unwrap()
            .with_overrides(Some("http://127.0.0.1:9999/flag"), Some(7));
        assert_eq!(config.url, "http://127.0.0.1:9999/flag");
        assert_eq!(config.timeout_secs, 7);

        let untouched = ClientConfig::from_env().unwrap().with_overrides(None, None);
        assert_eq!(untouched.url, "http://127.0.0.1:9999/env");
        assert_eq!(untouched.timeout_secs, 5);

        std::env::remove_var("SUBMIT_URL");
        std::env::remove_var("SUBMIT_TIMEOUT_SECS");
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SubmitError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        for url in ["", "   ", "ftp://example.com", "example.com/submit"] {
            let config = ClientConfig {
                url: url.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "accepted {:?}", url);
        }
    }

    // ========== Secret Loading Tests ==========

    #[test]
    fn test_load_secret_inline() {
        assert!(load_signing_secret(Some("s3cret"), None).is_ok());
    }

    #[test]
    fn test_load_secret_missing() {
        match load_signing_secret(None, None) {
            Err(SubmitError::Config(msg)) => assert!(msg.contains("SUBMIT_SIGNING_SECRET")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_secret_both_sources() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(load_signing_secret(Some("a"), Some(file.path())).is_err());
    }

    #[test]
    fn test_load_secret_inline_empty() {
        assert!(load_signing_secret(Some(""), None).is_err());
    }

    #[test]
    fn test_load_secret_file_strips_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "from-file").unwrap();

        let from_file = load_signing_secret(None, Some(file.path())).unwrap();
        let inline = load_signing_secret(Some("from-file"), None).unwrap();

        let data = b"body";
        assert_eq!(
            crate::signing::sign(data, &from_file),
            crate::signing::sign(data, &inline)
        );
    }

    #[test]
    fn test_load_secret_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        match load_signing_secret(None, Some(path.as_path())) {
            Err(SubmitError::Config(msg)) => assert!(msg.contains("cannot read")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
