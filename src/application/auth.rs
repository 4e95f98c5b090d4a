//! Authentication client for the 3C Plus API
//!
//! [`AuthClient`] performs login, session checks and logout, and owns the
//! token lifecycle. The token lives on the shared [`Transport`], so every
//! collaborator built on the same transport (see
//! [`MailingClient`](crate::application::mailing::MailingClient)) sends it
//! without keeping its own copy.

use crate::application::config::Config;
use crate::error::{AppError, Result, login_status_error, session_status_error};
use crate::model::auth::{PartialCredentials, error_message, extract_token};
use crate::model::http::{ApiRequest, HttpBackend, Transport, join_url};
use crate::model::retry::RetryConfig;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Authentication manager for the 3C Plus API
///
/// Starts unauthenticated. A successful [`login`](Self::login) stores the
/// token and installs the bearer header; [`logout`](Self::logout) removes
/// both. The client never logs in again on its own.
pub struct AuthClient {
    config: Config,
    transport: Arc<Transport>,
}

impl AuthClient {
    /// Creates a client using the default `reqwest` backend
    ///
    /// # Errors
    /// `AppError::Http` if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_transport(config, Arc::new(Transport::with_reqwest()?)))
    }

    /// Creates a client sending requests through `backend`
    pub fn with_backend(config: Config, backend: Arc<dyn HttpBackend>) -> Self {
        Self::with_transport(config, Arc::new(Transport::new(backend)))
    }

    /// Creates a client over an existing transport
    pub fn with_transport(config: Config, transport: Arc<Transport>) -> Self {
        Self { config, transport }
    }

    /// Client configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Base URL of the API
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Shared transport carrying the authorization state
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.config.base_url, path)
    }

    /// Logs in and stores the session token
    ///
    /// Missing credential fields are taken from the environment. Transient
    /// failures are retried per the configured [`RetryConfig`].
    ///
    /// # Returns
    /// * `Ok(String)` - The session token
    /// * `Err(AppError)` - `InputInvalid` for incomplete credentials (no request
    ///   sent), `InvalidCredentials` on 401, `TokenNotFound` when the response
    ///   has no token, or the mapped status error
    pub async fn login(&self, credentials: PartialCredentials) -> Result<String> {
        let creds = credentials.resolve()?;
        let url = self.url("authenticate");
        debug!("Sending login request to: {}", url);

        let body = json!({
            "user": creds.user,
            "password": creds.password,
            "company_id": creds.company_id,
            "company_domain": creds.company_domain,
        });
        let request = ApiRequest::post(url)
            .json(body)
            .timeout(self.config.timeout_duration());

        let response = self.transport.execute(&request, &self.config.retry).await?;
        let status = response.status();

        if !status.is_success() {
            let message = error_message(response.body());
            warn!("Login rejected with status {}: {}", status, message);
            return Err(login_status_error(status, message));
        }

        let body: Value = response.json()?;
        let Some(token) = extract_token(&body) else {
            error!("Token not found in authentication response");
            return Err(AppError::TokenNotFound);
        };

        self.transport.set_bearer(token.clone()).await;
        info!("✓ Login successful for user {}", creds.user);
        Ok(token)
    }

    /// Checks the session, returning the user profile as sent by the API
    ///
    /// # Errors
    /// `Unauthorized` when not logged in, `TokenExpired` on 401,
    /// `Unauthorized` on 403, or the mapped status error.
    pub async fn check_session(&self) -> Result<Value> {
        self.require_token().await?;

        let request = ApiRequest::get(self.url("me")).timeout(self.config.timeout_duration());
        let response = self
            .transport
            .execute(&request, &RetryConfig::no_retry())
            .await?;

        if response.status() == StatusCode::OK {
            return response.json();
        }
        Err(session_status_error(response.status(), "session check"))
    }

    /// Logs out and clears the stored token
    ///
    /// On 401/403 the token is cleared anyway, since the session was already
    /// dead, and `TokenExpired` is returned. Other failures leave it in place.
    pub async fn logout(&self) -> Result<()> {
        self.require_token().await?;
        info!("Logging out");

        let request = ApiRequest::get(self.url("logout")).timeout(self.config.timeout_duration());
        let response = self
            .transport
            .execute(&request, &RetryConfig::no_retry())
            .await?;

        match response.status() {
            StatusCode::OK => {
                self.transport.clear_bearer().await;
                info!("✓ Logged out successfully");
                Ok(())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                self.transport.clear_bearer().await;
                warn!("Session already expired at logout");
                Err(AppError::TokenExpired("session expired".to_string()))
            }
            status => Err(session_status_error(status, "logout")),
        }
    }

    /// Authorization header map for the current token
    ///
    /// # Errors
    /// `Unauthorized` when not logged in.
    pub async fn auth_headers(&self) -> Result<HashMap<String, String>> {
        self.transport
            .auth_headers()
            .await
            .ok_or_else(not_authenticated)
    }

    /// True while a token is held
    pub async fn is_authenticated(&self) -> bool {
        self.transport.bearer().await.is_some()
    }

    /// Current token
    ///
    /// # Errors
    /// `Unauthorized` when not logged in.
    pub async fn token(&self) -> Result<String> {
        self.require_token().await
    }

    async fn require_token(&self) -> Result<String> {
        self.transport.bearer().await.ok_or_else(not_authenticated)
    }
}

fn not_authenticated() -> AppError {
    AppError::Unauthorized("not authenticated".to_string())
}
