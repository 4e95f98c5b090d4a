use threec_client::application::config::{Config, MailingConfig};
use threec_client::model::retry::RetryConfig;

#[test]
fn test_config_builders() {
    let config = Config {
        base_url: "http://h/api/v1".to_string(),
        timeout: 15,
        retry: RetryConfig::new(),
    }
    .timeout_secs(3)
    .retry(RetryConfig::with_max_retries(5));

    assert_eq!(config.timeout_duration().as_secs(), 3);
    assert_eq!(config.retry.max_retries(), 5);
}

#[test]
fn test_with_base_url_trims_trailing_slash() {
    let config = Config::with_base_url("http://h/api/v1/");
    assert_eq!(config.base_url, "http://h/api/v1");
}

#[test]
fn test_mailing_config_builders() {
    let config = MailingConfig {
        base_url: None,
        timeout: 20,
        retry: RetryConfig::new(),
    }
    .base_url("http://other/")
    .timeout_secs(9);

    assert_eq!(config.base_url.as_deref(), Some("http://other"));
    assert_eq!(config.timeout_duration().as_secs(), 9);
}

#[test]
fn test_config_display_is_json() {
    let config = Config {
        base_url: "http://h".to_string(),
        timeout: 1,
        retry: RetryConfig::with_max_retries(2),
    };
    let text = config.to_string();
    assert!(text.contains("http://h"));
}
