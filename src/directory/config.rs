//! Connection settings for the directory endpoints plus the error-slot policy.
//! Values usually come from CLI flags or `USERDIR_*` environment variables; the
//! API key is kept as a secret and never logged.

use secrecy::SecretString;
use std::{fmt, str::FromStr, time::Duration};

/// Public listing service used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";
/// Default request timeout (seconds) applied to every directory request.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Whether a successful fetch clears the error left by a previous failure of the
/// same loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Errors stay until dismissed or overwritten by another failure.
    #[default]
    Retain,
    /// A successful fetch clears its own loader's error slot.
    ClearOnSuccess,
}

impl ErrorPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::ClearOnSuccess => "clear-on-success",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "clear-on-success" | "clear" => Ok(Self::ClearOnSuccess),
            other => Err(format!(
                "invalid error policy '{other}', expected 'retain' or 'clear-on-success'"
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub api_key: Option<SecretString>,
    pub timeout: Duration,
    pub error_policy: ErrorPolicy,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl DirectoryConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            error_policy: ErrorPolicy::default(),
        }
    }

    /// Sets the `x-api-key` header value; blank keys are ignored.
    #[must_use]
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = normalize_value(key).map(SecretString::from);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }
}

fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
