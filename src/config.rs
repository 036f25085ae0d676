//! Client and session configuration.
//!
//! Both structs deserialize with defaults for every missing field and can
//! be overridden from environment variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `U_ASSIGN_BASE_URL` | `ClientConfig::base_url` |
//! | `U_ASSIGN_TOKEN` | `ClientConfig::auth_token` |
//! | `U_ASSIGN_TIMEOUT_MS` | `ClientConfig::request_timeout_ms` |
//! | `U_ASSIGN_MIN_THINKING_MS` | `SessionConfig::min_thinking_ms` |
//! | `U_ASSIGN_PLACEHOLDERS` | `SessionConfig::placeholder_limit` |

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum visible "thinking" duration.
pub const DEFAULT_MIN_THINKING_MS: u64 = 1200;

/// Default number of load-snapshot placeholders drawn before a result.
pub const DEFAULT_PLACEHOLDER_LIMIT: usize = 3;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Connection settings for the collaborator API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API origin, without trailing slash.
    pub base_url: String,
    /// Bearer token sent as `Authorization`, if any.
    pub auth_token: Option<String>,
    /// Per-request timeout enforced by the HTTP client (ms); 0 disables it.
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: None,
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the bearer token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.request_timeout_ms = ms;
        self
    }

    /// Request timeout, `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }

    /// Defaults overridden by `U_ASSIGN_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup("U_ASSIGN_BASE_URL") {
            config.base_url = url;
        }
        config.auth_token = lookup("U_ASSIGN_TOKEN").filter(|t| !t.trim().is_empty());
        if let Some(raw) = lookup("U_ASSIGN_TIMEOUT_MS") {
            config.request_timeout_ms = parse_env("U_ASSIGN_TIMEOUT_MS", &raw)?;
        }
        Ok(config)
    }
}

/// Behavior of an assignment session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Minimum time between submission and showing a result (ms).
    pub min_thinking_ms: u64,
    /// Load-snapshot technicians drawn before any result.
    pub placeholder_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_thinking_ms: DEFAULT_MIN_THINKING_MS,
            placeholder_limit: DEFAULT_PLACEHOLDER_LIMIT,
        }
    }
}

impl SessionConfig {
    /// Sets the minimum thinking duration.
    pub fn with_min_thinking_ms(mut self, ms: u64) -> Self {
        self.min_thinking_ms = ms;
        self
    }

    /// Sets the placeholder count.
    pub fn with_placeholder_limit(mut self, limit: usize) -> Self {
        self.placeholder_limit = limit;
        self
    }

    /// Minimum thinking duration as a `Duration`.
    pub fn min_thinking(&self) -> Duration {
        Duration::from_millis(self.min_thinking_ms)
    }

    /// Defaults overridden by `U_ASSIGN_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup("U_ASSIGN_MIN_THINKING_MS") {
            config.min_thinking_ms = parse_env("U_ASSIGN_MIN_THINKING_MS", &raw)?;
        }
        if let Some(raw) = lookup("U_ASSIGN_PLACEHOLDERS") {
            config.placeholder_limit = parse_env("U_ASSIGN_PLACEHOLDERS", &raw)?;
        }
        Ok(config)
    }
}

fn parse_env<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnv {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
