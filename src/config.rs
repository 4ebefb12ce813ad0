use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::constants::TWITTER_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to parse {name} as boolean: {value}")]
    ParseBool { name: String, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Target
    pub handle: String,
    pub base_url: String,

    // Polling
    pub poll_interval: Duration,
    pub include_profile: bool,

    // Network
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Target
            handle: required_env("TWITTER_HANDLE")?,
            base_url: env_or_default("TWITTER_BASE_URL", TWITTER_BASE_URL)
                .trim_end_matches('/')
                .to_string(),

            // Polling
            poll_interval: Duration::from_secs(parse_env_u64("POLL_INTERVAL_SECS", 60)?),
            include_profile: parse_env_bool("INCLUDE_PROFILE", false)?,

            // Network
            request_timeout: Duration::from_secs(parse_env_u64("REQUEST_TIMEOUT_SECS", 30)?),
        })
    }

    /// Defaults used by tests; point `base_url` at a mock server as needed.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            handle: "fyko".to_string(),
            base_url: TWITTER_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(1),
            include_profile: false,
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.handle.is_empty() || self.handle.contains('/') {
            return Err(ConfigError::InvalidValue {
                name: "TWITTER_HANDLE".to_string(),
                message: format!("not a profile handle: '{}'", self.handle),
            });
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "POLL_INTERVAL_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.allowed_domain().is_none() {
            return Err(ConfigError::InvalidValue {
                name: "TWITTER_BASE_URL".to_string(),
                message: format!("must be an absolute http(s) URL, got '{}'", self.base_url),
            });
        }
        Ok(())
    }

    /// Host the crawler is restricted to, derived from `base_url`.
    #[must_use]
    pub fn allowed_domain(&self) -> Option<String> {
        let parsed = Url::parse(&self.base_url).ok()?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return None;
        }
        parsed.host_str().map(str::to_lowercase)
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::ParseBool {
                name: name.to_string(),
                value: val,
            }),
        },
        _ => Ok(default),
    }
}
