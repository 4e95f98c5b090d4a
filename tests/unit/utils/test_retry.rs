use std::time::Duration;
use threec_client::model::retry::RetryConfig;

#[test]
fn test_retry_config_with_max_retries() {
    let config = RetryConfig::with_max_retries(5);
    assert_eq!(config.max_retries(), 5);
}

#[test]
fn test_retry_config_no_retry() {
    let config = RetryConfig::no_retry();
    assert_eq!(config.max_retries(), 1);
}

#[test]
fn test_retry_config_zero_still_attempts_once() {
    let config = RetryConfig::with_max_retries_and_delay(0, 10, 0);
    assert_eq!(config.max_retries(), 1);
}

#[test]
fn test_retry_config_defaults() {
    let config = RetryConfig {
        max_retry_count: None,
        base_delay_ms: None,
        jitter_ms: None,
    };
    assert_eq!(config.max_retries(), 3);
    assert_eq!(config.base_delay(), Duration::from_millis(1000));
    assert_eq!(config.jitter(), Duration::from_millis(100));
}

#[test]
fn test_retry_config_backoff_doubles() {
    let config = RetryConfig::with_max_retries_and_delay(4, 1000, 100);
    assert_eq!(config.backoff_base(1), Duration::from_secs(1));
    assert_eq!(config.backoff_base(2), Duration::from_secs(2));
    assert_eq!(config.backoff_base(3), Duration::from_secs(4));
}

#[test]
fn test_retry_config_backoff_jitter_bounds() {
    let config = RetryConfig::with_max_retries_and_delay(3, 1000, 100);
    for _ in 0..50 {
        let wait = config.backoff(2);
        assert!(wait >= Duration::from_millis(2000));
        assert!(wait < Duration::from_millis(2100));
    }
}

#[test]
fn test_retry_config_without_jitter_is_exact() {
    let config = RetryConfig::with_max_retries_and_delay(3, 5, 0);
    assert_eq!(config.backoff(3), Duration::from_millis(20));
}

#[test]
fn test_retry_config_serialization() {
    let config = RetryConfig::with_max_retries_and_delay(2, 50, 5);
    let json = serde_json::to_string(&config).unwrap();
    let back: RetryConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
