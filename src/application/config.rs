use crate::constants::{
    DEFAULT_AUTH_TIMEOUT_SECS, DEFAULT_BASE_URL, DEFAULT_MAILING_TIMEOUT_SECS, ENV_BASE_URL,
};
use crate::model::retry::RetryConfig;
use crate::utils::config::{get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// Configuration for the authentication client and its transport
pub struct Config {
    /// Base URL of the 3C Plus REST API, without trailing slash
    pub base_url: String,
    /// Timeout in seconds for each request attempt
    pub timeout: u64,
    /// Retry behavior for login
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from the environment (and `.env`, if present)
    ///
    /// `THREEC_BASE_URL` overrides the built-in base URL and `THREEC_TIMEOUT`
    /// the default 15 second timeout.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        Config {
            base_url: get_env_or_default(ENV_BASE_URL, String::from(DEFAULT_BASE_URL))
                .trim_end_matches('/')
                .to_string(),
            timeout: get_env_or_default("THREEC_TIMEOUT", DEFAULT_AUTH_TIMEOUT_SECS),
            retry: RetryConfig::default(),
        }
    }

    /// Creates a configuration for an explicit base URL; other values from the environment
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new()
        }
    }

    /// Replaces the retry configuration
    #[must_use]
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Replaces the timeout, in seconds
    #[must_use]
    pub fn timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout as a `Duration`
    #[must_use]
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// Configuration for the mailing client
pub struct MailingConfig {
    /// Base URL override; the auth client's base URL is used when `None`
    pub base_url: Option<String>,
    /// Timeout in seconds for each request attempt
    pub timeout: u64,
    /// Retry behavior per endpoint candidate
    pub retry: RetryConfig,
}

impl Default for MailingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MailingConfig {
    /// Creates a configuration from the environment
    ///
    /// `THREEC_MAILING_BASE_URL` sets the base URL override and
    /// `THREEC_MAILING_TIMEOUT` the default 20 second timeout.
    pub fn new() -> Self {
        MailingConfig {
            base_url: get_env_or_none::<String>("THREEC_MAILING_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            timeout: get_env_or_default("THREEC_MAILING_TIMEOUT", DEFAULT_MAILING_TIMEOUT_SECS),
            retry: RetryConfig::default(),
        }
    }

    /// Sets the base URL override
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Replaces the retry configuration
    #[must_use]
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Replaces the timeout, in seconds
    #[must_use]
    pub fn timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout as a `Duration`
    #[must_use]
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
