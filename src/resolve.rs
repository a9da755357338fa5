//! Field value resolution
//!
//! Each payload field is resolved with a fixed precedence: explicit override,
//! then environment variable, then a value derived from the CI context (for
//! the two links), then a static placeholder. Resolution is a pure function of
//! an [`EnvSource`], so the same inputs always produce the same payload.

use std::collections::{BTreeMap, HashMap};

use crate::payload::Payload;

// Environment variable names
pub const ENV_NAME: &str = "B12_NAME";
pub const ENV_EMAIL: &str = "B12_EMAIL";
pub const ENV_RESUME_LINK: &str = "B12_RESUME_LINK";
pub const ENV_REPOSITORY_LINK: &str = "B12_REPOSITORY_LINK";
pub const ENV_ACTION_RUN_LINK: &str = "B12_ACTION_RUN_LINK";
pub const ENV_GITHUB_SERVER_URL: &str = "GITHUB_SERVER_URL";
pub const ENV_GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_GITHUB_RUN_ID: &str = "GITHUB_RUN_ID";

// Placeholders used when nothing else is available
pub const PLACEHOLDER_NAME: &str = "YOUR_NAME";
pub const PLACEHOLDER_EMAIL: &str = "YOUR_EMAIL";
pub const PLACEHOLDER_RESUME_LINK: &str = "RESUME_LINK";
pub const PLACEHOLDER_REPOSITORY_LINK: &str = "https://github.com/<owner>/<repo>";
pub const PLACEHOLDER_ACTION_RUN_LINK: &str =
    "https://github.com/<owner>/<repo>/actions/runs/<run_id>";

const DEFAULT_GITHUB_SERVER_URL: &str = "https://github.com";

/// Key/value lookup standing in for the process environment
pub trait EnvSource {
    /// Raw value of `key`, if set
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key` exactly as set; blank counts as unset
    fn non_blank(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.trim().is_empty())
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// Explicit command-line value
    Override,
    /// Named environment variable
    Environment(&'static str),
    /// Built from the GitHub Actions context
    Context,
    /// Static placeholder
    Placeholder,
}

/// A field value together with its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: FieldSource,
}

impl Resolved {
    fn new(value: impl Into<String>, source: FieldSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }

    /// True when a placeholder was substituted
    pub fn is_placeholder(&self) -> bool {
        self.source == FieldSource::Placeholder
    }
}

/// Explicit per-field values that win over everything else
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOverrides {
    pub name: Option<String>,
    pub email: Option<String>,
    pub resume_link: Option<String>,
    pub repository_link: Option<String>,
    pub action_run_link: Option<String>,
}

/// GitHub Actions context, read once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubContext {
    pub server_url: String,
    pub repository: Option<String>,
    pub run_id: Option<String>,
}

impl GithubContext {
    pub fn from_env(env: &dyn EnvSource) -> Self {
        // Runner-provided, so surrounding whitespace is noise
        let trimmed = |key: &str| env.non_blank(key).map(|v| v.trim().to_string());

        let server_url = trimmed(ENV_GITHUB_SERVER_URL)
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GITHUB_SERVER_URL.to_string());

        Self {
            server_url,
            repository: trimmed(ENV_GITHUB_REPOSITORY),
            run_id: trimmed(ENV_GITHUB_RUN_ID),
        }
    }

    /// `{server}/{owner}/{repo}`
    pub fn repository_link(&self) -> Option<String> {
        self.repository
            .as_ref()
            .map(|repo| format!("{}/{}", self.server_url, repo))
    }

    /// `{server}/{owner}/{repo}/actions/runs/{run_id}`; needs both parts
    pub fn action_run_link(&self) -> Option<String> {
        match (&self.repository, &self.run_id) {
            (Some(repo), Some(run_id)) => Some(format!(
                "{}/{}/actions/runs/{}",
                self.server_url, repo, run_id
            )),
            _ => None,
        }
    }
}

/// All non-timestamp payload fields, resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantFields {
    pub name: Resolved,
    pub email: Resolved,
    pub resume_link: Resolved,
    pub repository_link: Resolved,
    pub action_run_link: Resolved,
}

impl ApplicantFields {
    /// Resolve every field from `overrides` and `env`
    pub fn resolve(env: &dyn EnvSource, overrides: &FieldOverrides) -> Self {
        let context = GithubContext::from_env(env);

        Self {
            name: pick(&overrides.name, env, ENV_NAME, None, PLACEHOLDER_NAME),
            email: pick(&overrides.email, env, ENV_EMAIL, None, PLACEHOLDER_EMAIL),
            resume_link: pick(
                &overrides.resume_link,
                env,
                ENV_RESUME_LINK,
                None,
                PLACEHOLDER_RESUME_LINK,
            ),
            repository_link: pick(
                &overrides.repository_link,
                env,
                ENV_REPOSITORY_LINK,
                context.repository_link(),
                PLACEHOLDER_REPOSITORY_LINK,
            ),
            action_run_link: pick(
                &overrides.action_run_link,
                env,
                ENV_ACTION_RUN_LINK,
                context.action_run_link(),
                PLACEHOLDER_ACTION_RUN_LINK,
            ),
        }
    }

    /// Names of fields that fell back to a placeholder
    pub fn placeholders(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("resume_link", &self.resume_link),
            ("repository_link", &self.repository_link),
            ("action_run_link", &self.action_run_link),
        ]
        .into_iter()
        .filter(|(_, r)| r.is_placeholder())
        .map(|(field, _)| field)
        .collect()
    }

    /// Complete the payload with a timestamp
    pub fn into_payload(self, timestamp: String) -> Payload {
        Payload {
            timestamp,
            name: self.name.value,
            email: self.email.value,
            resume_link: self.resume_link.value,
            repository_link: self.repository_link.value,
            action_run_link: self.action_run_link.value,
        }
    }
}

fn pick(
    explicit: &Option<String>,
    env: &dyn EnvSource,
    key: &'static str,
    derived: Option<String>,
    placeholder: &str,
) -> Resolved {
    if let Some(value) = explicit.as_deref().filter(|v| !v.trim().is_empty()) {
        return Resolved::new(value, FieldSource::Override);
    }
    if let Some(value) = env.non_blank(key) {
        return Resolved::new(value, FieldSource::Environment(key));
    }
    if let Some(value) = derived {
        return Resolved::new(value, FieldSource::Context);
    }
    Resolved::new(placeholder, FieldSource::Placeholder)
}
