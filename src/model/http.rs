//! HTTP request execution shared by the auth and mailing clients.
//!
//! [`Transport`] owns the retry loop and the shared header state (the bearer
//! token). Network I/O goes through the [`HttpBackend`] trait so the loop can
//! be driven by any backend; [`ReqwestBackend`] is the default.

use crate::constants::{IDEMPOTENCY_KEY_HEADER, USER_AGENT};
use crate::error::{AppError, Result, UnavailableReason};
use crate::model::retry::RetryConfig;
use crate::utils::id::get_id;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

/// A file sent as one part of a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    /// Form field name
    pub field_name: String,
    /// File name reported to the server
    pub file_name: String,
    /// MIME type of the content
    pub content_type: String,
    /// Raw file content
    pub content: Vec<u8>,
}

/// Body of an outgoing request
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON document
    Json(Value),
    /// Form fields, sent multipart when a file is attached and url-encoded otherwise
    Form {
        /// Plain text fields
        fields: Vec<(String, String)>,
        /// Optional file part
        file: Option<FileAttachment>,
    },
}

/// One logical API call, possibly sent several times by the retry loop
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Query string pairs
    pub query: Vec<(String, String)>,
    /// Request body
    pub body: RequestBody,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Key deduplicating retried writes, constant for the whole call
    pub idempotency_key: Option<String>,
}

impl ApiRequest {
    /// Creates a request with no body, no query and a 30 second timeout
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            timeout: Duration::from_secs(30),
            idempotency_key: None,
        }
    }

    /// Shorthand for a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Shorthand for a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Shorthand for a PUT request
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Sets a JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Sets a form body
    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>, file: Option<FileAttachment>) -> Self {
        self.body = RequestBody::Form { fields, file };
        self
    }

    /// Adds a query pair
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the per-attempt timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Marks the call idempotent, generating a fresh key for it
    #[must_use]
    pub fn idempotent(mut self) -> Self {
        self.idempotency_key = Some(get_id());
        self
    }

}

/// A call whose URL is picked later, once per endpoint candidate
///
/// Carries everything but the URL. Each [`at`](Self::at) yields a request
/// sharing the same idempotency key, so retries on any candidate count as
/// one logical write.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTemplate {
    /// HTTP method
    pub method: Method,
    /// Request body
    pub body: RequestBody,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Key shared by every request built from this template
    pub idempotency_key: Option<String>,
}

impl RequestTemplate {
    /// Template with no body and a 30 second timeout
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: RequestBody::Empty,
            timeout: Duration::from_secs(30),
            idempotency_key: None,
        }
    }

    /// Sets a JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Sets a form body
    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>, file: Option<FileAttachment>) -> Self {
        self.body = RequestBody::Form { fields, file };
        self
    }

    /// Sets the per-attempt timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Generates the idempotency key for this call
    #[must_use]
    pub fn idempotent(mut self) -> Self {
        self.idempotency_key = Some(get_id());
        self
    }

    /// Concrete request for `url`
    #[must_use]
    pub fn at(&self, url: impl Into<String>) -> ApiRequest {
        ApiRequest {
            method: self.method.clone(),
            url: url.into(),
            query: Vec::new(),
            body: self.body.clone(),
            timeout: self.timeout,
            idempotency_key: self.idempotency_key.clone(),
        }
    }
}

/// A single attempt as handed to the backend, headers resolved
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Header pairs
    pub headers: Vec<(String, String)>,
    /// Query string pairs
    pub query: Vec<(String, String)>,
    /// Request body
    pub body: RequestBody,
    /// Attempt timeout
    pub timeout: Duration,
}

impl OutgoingRequest {
    /// Value of the first header named `name`, case-insensitive
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status and fully read body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a response with a JSON body
    pub fn json_body(status: StatusCode, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// HTTP status
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw body
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as lossy UTF-8 text
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON
    ///
    /// An empty body decodes as JSON `null` when `T` accepts it.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Failure to obtain any response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// Attempt timed out
    Timeout,
    /// Connection-level error
    Network(String),
}

impl From<SendError> for UnavailableReason {
    fn from(err: SendError) -> Self {
        match err {
            SendError::Timeout => UnavailableReason::Timeout,
            SendError::Network(msg) => UnavailableReason::Network(msg),
        }
    }
}

/// Sends one attempt over the wire
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Sends the request and reads the full response
    async fn send(&self, request: OutgoingRequest) -> std::result::Result<ApiResponse, SendError>;
}

/// [`HttpBackend`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: Client,
}

impl ReqwestBackend {
    /// Creates a backend with the library user agent
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Wraps an existing client
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn classify(err: &reqwest::Error) -> SendError {
    if err.is_timeout() {
        SendError::Timeout
    } else {
        SendError::Network(err.to_string())
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: OutgoingRequest) -> std::result::Result<ApiResponse, SendError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Form { fields, file: None } => builder.form(&fields),
            RequestBody::Form {
                fields,
                file: Some(file),
            } => {
                let mut form = Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                let part = Part::bytes(file.content)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| SendError::Network(e.to_string()))?;
                builder.multipart(form.part(file.field_name, part))
            }
        };

        let response = builder.send().await.map_err(|e| classify(&e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| classify(&e))?;
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

/// Request executor with retry and shared authorization state
pub struct Transport {
    backend: Arc<dyn HttpBackend>,
    bearer: RwLock<Option<String>>,
}

impl Transport {
    /// Creates a transport over the given backend, unauthenticated
    pub fn new(backend: Arc<dyn HttpBackend>) -> Self {
        Self {
            backend,
            bearer: RwLock::new(None),
        }
    }

    /// Creates a transport over a default [`ReqwestBackend`]
    pub fn with_reqwest() -> Result<Self> {
        Ok(Self::new(Arc::new(ReqwestBackend::new()?)))
    }

    /// Current bearer token, if any
    pub async fn bearer(&self) -> Option<String> {
        self.bearer.read().await.clone()
    }

    /// Installs the bearer token sent on every subsequent attempt
    pub async fn set_bearer(&self, token: String) {
        *self.bearer.write().await = Some(token);
    }

    /// Removes the bearer token
    pub async fn clear_bearer(&self) {
        *self.bearer.write().await = None;
    }

    /// Authorization header map for the current token
    pub async fn auth_headers(&self) -> Option<HashMap<String, String>> {
        self.bearer().await.map(|token| {
            HashMap::from([("Authorization".to_string(), format!("Bearer {token}"))])
        })
    }

    async fn outgoing(&self, request: &ApiRequest) -> OutgoingRequest {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(token) = self.bearer().await {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        if let Some(key) = &request.idempotency_key {
            headers.push((IDEMPOTENCY_KEY_HEADER.to_string(), key.clone()));
        }
        OutgoingRequest {
            method: request.method.clone(),
            url: request.url.clone(),
            headers,
            query: request.query.clone(),
            body: request.body.clone(),
            timeout: request.timeout,
        }
    }

    /// Executes a request, retrying transient failures
    ///
    /// Network errors, timeouts and 5xx answers are retried up to
    /// `retry.max_retries()` attempts with exponential backoff. Any other
    /// response, success or client error, is returned immediately.
    ///
    /// # Errors
    /// `AppError::ApiUnavailable` carrying the last cause once every attempt failed.
    pub async fn execute(&self, request: &ApiRequest, retry: &RetryConfig) -> Result<ApiResponse> {
        let max_attempts = retry.max_retries();
        let mut last_failure = UnavailableReason::Network("no attempt made".to_string());

        for attempt in 1..=max_attempts {
            let outgoing = self.outgoing(request).await;
            debug!("{} {} (attempt {}/{})", request.method, request.url, attempt, max_attempts);

            match self.backend.send(outgoing).await {
                Ok(response) if response.status().is_server_error() => {
                    warn!(
                        "Server error {} from {} (attempt {}/{})",
                        response.status(),
                        request.url,
                        attempt,
                        max_attempts
                    );
                    last_failure = UnavailableReason::ServerError(response.status());
                }
                Ok(response) => {
                    debug!("Response status: {}", response.status());
                    return Ok(response);
                }
                Err(err) => {
                    warn!(
                        "Request to {} failed (attempt {}/{}): {:?}",
                        request.url, attempt, max_attempts, err
                    );
                    last_failure = err.into();
                }
            }

            if attempt < max_attempts {
                let wait = retry.backoff(attempt);
                debug!("Waiting {:?} before retrying", wait);
                tokio::time::sleep(wait).await;
            }
        }

        error!(
            "Giving up on {} {} after {} attempts: {}",
            request.method, request.url, max_attempts, last_failure
        );
        Err(AppError::ApiUnavailable(last_failure))
    }
}

/// Joins a base URL and a relative path with exactly one slash
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
