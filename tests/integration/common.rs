// Common utilities for integration tests

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use threec_client::prelude::*;

/// Backend replaying a fixed list of replies and recording every request
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<ApiResponse, SendError>>>,
    requests: Mutex<Vec<OutgoingRequest>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<ApiResponse, SendError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<OutgoingRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpBackend for ScriptedBackend {
    async fn send(&self, request: OutgoingRequest) -> Result<ApiResponse, SendError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SendError::Network("script exhausted".to_string())))
    }
}

pub fn reply(status: u16, body: Value) -> Result<ApiResponse, SendError> {
    Ok(ApiResponse::json_body(
        StatusCode::from_u16(status).unwrap(),
        &body,
    ))
}

pub fn empty_reply(status: u16) -> Result<ApiResponse, SendError> {
    Ok(ApiResponse::new(StatusCode::from_u16(status).unwrap(), Vec::new()))
}

/// Three attempts with millisecond backoff
pub fn fast_retry() -> RetryConfig {
    RetryConfig::with_max_retries_and_delay(3, 1, 1)
}

pub fn test_config(base_url: &str) -> Config {
    Config {
        base_url: base_url.trim_end_matches('/').to_string(),
        timeout: 5,
        retry: fast_retry(),
    }
}

pub fn mailing_config() -> MailingConfig {
    MailingConfig {
        base_url: None,
        timeout: 5,
        retry: fast_retry(),
    }
}

pub fn credentials() -> PartialCredentials {
    PartialCredentials::new("u", "p", 1, "d")
}

/// Auth client over a scripted backend, already holding token `t`
pub async fn authenticated(backend: Arc<ScriptedBackend>) -> Arc<AuthClient> {
    let auth = AuthClient::with_backend(test_config("http://test/api/v1"), backend);
    auth.transport().set_bearer("t".to_string()).await;
    Arc::new(auth)
}

/// Auth client against a mockito server, already holding token `t`
pub async fn authenticated_http(base_url: &str) -> Arc<AuthClient> {
    let auth = AuthClient::new(test_config(base_url)).unwrap();
    auth.transport().set_bearer("t".to_string()).await;
    Arc::new(auth)
}
