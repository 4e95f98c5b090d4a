use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_RETRY_JITTER_MS};
use crate::utils::config::get_env_or_none;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for HTTP request retry behavior
///
/// Transient failures (timeouts, network errors, 5xx) are retried with
/// exponential backoff: after attempt `k` the transport waits
/// `base_delay * 2^(k-1)` plus a random jitter below `jitter`.
#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts, first try included (None = default 3)
    pub max_retry_count: Option<u32>,
    /// Base backoff delay in milliseconds (None = default 1000)
    pub base_delay_ms: Option<u64>,
    /// Exclusive upper bound of the jitter in milliseconds (None = default 100)
    pub jitter_ms: Option<u64>,
}

impl RetryConfig {
    /// Creates a new retry configuration from the environment, falling back to defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration performing a single attempt and never sleeping
    #[must_use]
    pub fn no_retry() -> Self {
        Self::with_max_retries(1)
    }

    /// Creates a retry configuration with a maximum number of attempts and default delays
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retry_count: Some(max_retries),
            base_delay_ms: None,
            jitter_ms: None,
        }
    }

    /// Creates a retry configuration with explicit attempts, base delay and jitter
    #[must_use]
    pub fn with_max_retries_and_delay(max_retries: u32, base_delay_ms: u64, jitter_ms: u64) -> Self {
        Self {
            max_retry_count: Some(max_retries),
            base_delay_ms: Some(base_delay_ms),
            jitter_ms: Some(jitter_ms),
        }
    }

    /// Gets the maximum number of attempts, never less than one
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retry_count.unwrap_or(DEFAULT_MAX_RETRIES).max(1)
    }

    /// Gets the base backoff delay
    #[must_use]
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms.unwrap_or(DEFAULT_RETRY_BASE_DELAY_MS))
    }

    /// Gets the jitter upper bound
    #[must_use]
    pub fn jitter(&self) -> Duration {
        Duration::from_millis(self.jitter_ms.unwrap_or(DEFAULT_RETRY_JITTER_MS))
    }

    /// Deterministic part of the wait after the given 1-indexed attempt
    #[must_use]
    pub fn backoff_base(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay().saturating_mul(1u32 << exponent)
    }

    /// Full wait after the given 1-indexed attempt, jitter included
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let jitter_ms = self.jitter().as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::rng().random_range(0..jitter_ms))
        };
        self.backoff_base(attempt) + jitter
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retry_count: get_env_or_none("THREEC_MAX_RETRIES"),
            base_delay_ms: get_env_or_none("THREEC_RETRY_BASE_DELAY_MS"),
            jitter_ms: get_env_or_none("THREEC_RETRY_JITTER_MS"),
        }
    }
}
