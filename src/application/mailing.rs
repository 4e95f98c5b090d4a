//! Mailing client for the 3C Plus API
//!
//! Creates mailing containers, uploads contacts (JSON, columnar rows or CSV)
//! and adjusts mailing weight. Authentication is delegated to a shared
//! [`AuthClient`]; every request reads the current token from its transport.

use crate::application::auth::AuthClient;
use crate::application::config::MailingConfig;
use crate::error::{AppError, Result, UnavailableReason, mailing_status_error};
use crate::model::campaign::{Campaign, campaigns_from_response};
use crate::model::contact::Contact;
use crate::model::endpoints::{EndpointRegistry, Operation};
use crate::model::http::{ApiResponse, FileAttachment, RequestTemplate, join_url};
use crate::model::mailing::{
    CreateContainerRequest, MailingContainer, UploadRequest, WeightRequest, extract_mailing_id,
    reports_success,
};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Boxed error returned by a persistence callback
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Hook invoked with every container created by the client
pub type PersistCallback = Arc<dyn Fn(&MailingContainer) -> std::result::Result<(), BoxError> + Send + Sync>;

/// Client for mailing operations
pub struct MailingClient {
    auth: Arc<AuthClient>,
    config: MailingConfig,
    endpoints: EndpointRegistry,
    persist_callback: Option<PersistCallback>,
    mailing_ids: RwLock<Vec<i64>>,
    campaign_ids: RwLock<Vec<i64>>,
}

impl MailingClient {
    /// Creates a client with the default endpoint registry
    pub fn new(auth: Arc<AuthClient>, config: MailingConfig) -> Self {
        Self {
            auth,
            config,
            endpoints: EndpointRegistry::default(),
            persist_callback: None,
            mailing_ids: RwLock::new(Vec::new()),
            campaign_ids: RwLock::new(Vec::new()),
        }
    }

    /// Replaces the endpoint registry
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: EndpointRegistry) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Merges per-operation overrides over the current registry
    #[must_use]
    pub fn with_endpoint_overrides(mut self, overrides: HashMap<Operation, Vec<String>>) -> Self {
        self.endpoints = self.endpoints.with_overrides(overrides);
        self
    }

    /// Installs a hook called after every successful container creation
    #[must_use]
    pub fn with_persist_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&MailingContainer) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
    {
        self.persist_callback = Some(Arc::new(callback));
        self
    }

    /// Endpoint registry in use
    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    /// Auth client this mailing client relies on
    pub fn auth(&self) -> &Arc<AuthClient> {
        &self.auth
    }

    /// Mailing ids created during the lifetime of this client
    pub async fn mailing_ids(&self) -> Vec<i64> {
        self.mailing_ids.read().await.clone()
    }

    /// Campaign ids seen in listings during the lifetime of this client
    pub async fn campaign_ids(&self) -> Vec<i64> {
        self.campaign_ids.read().await.clone()
    }

    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.auth.base_url())
    }

    /// Sends `template` to each candidate path of `operation` in turn
    ///
    /// A 404 means the path variant does not exist here and moves on to the
    /// next one, as does a candidate whose retries are exhausted. The first
    /// other response is returned unmapped.
    async fn resolve(&self, operation: Operation, template: &RequestTemplate) -> Result<ApiResponse> {
        self.auth.token().await?;

        let candidates = self.endpoints.candidates(operation);
        if candidates.is_empty() {
            return Err(AppError::EndpointNotConfigured(operation));
        }

        let mut last_failure: Option<UnavailableReason> = None;
        for path in &candidates {
            let attempt = template.at(join_url(self.base_url(), path));
            match self.auth.transport().execute(&attempt, &self.config.retry).await {
                Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                    debug!("{} not found at {}, trying next variant", operation, path);
                }
                Ok(response) => return Ok(response),
                Err(AppError::ApiUnavailable(reason)) => {
                    warn!("{} unavailable at {}: {}", operation, path, reason);
                    last_failure = Some(reason);
                }
                Err(e) => return Err(e),
            }
        }

        match last_failure {
            Some(reason) if reason.is_connection_failure() => Err(AppError::ApiUnavailable(reason)),
            _ => {
                error!("No endpoint variant answered for {}: {:?}", operation, candidates);
                Err(AppError::CampaignNotFound(operation))
            }
        }
    }

    async fn call(&self, operation: Operation, template: RequestTemplate) -> Result<Value> {
        let template = template.timeout(self.config.timeout_duration());
        let response = self.resolve(operation, &template).await?;
        handle_response(&response, operation)
    }

    async fn post_json<B: Serialize>(&self, operation: Operation, body: &B) -> Result<Value> {
        let template = RequestTemplate::new(Method::POST)
            .json(serde_json::to_value(body)?)
            .idempotent();
        self.call(operation, template).await
    }

    async fn put_json<B: Serialize>(&self, operation: Operation, body: &B) -> Result<Value> {
        let template = RequestTemplate::new(Method::PUT)
            .json(serde_json::to_value(body)?)
            .idempotent();
        self.call(operation, template).await
    }

    /// Lists campaigns, optionally filtered by name
    ///
    /// # Arguments
    /// * `filter` - Case-insensitive substring the name must contain
    /// * `only_active` - Drop campaigns flagged inactive
    ///
    /// # Returns
    /// Matching campaigns in API order
    pub async fn list_campaigns(&self, filter: Option<&str>, only_active: bool) -> Result<Vec<Campaign>> {
        let body = self
            .call(Operation::ListCampaigns, RequestTemplate::new(Method::GET))
            .await?;

        let mut result = Vec::new();
        let mut seen = self.campaign_ids.write().await;
        for campaign in campaigns_from_response(&body) {
            if let Some(filter) = filter.filter(|f| !f.is_empty()) {
                if !campaign.name_contains(filter) {
                    continue;
                }
            }
            if only_active && !campaign.is_active() {
                continue;
            }
            if let Some(id) = campaign.id() {
                seen.push(id);
            }
            result.push(campaign);
        }

        debug!("Listed {} campaigns", result.len());
        Ok(result)
    }

    /// Creates an empty mailing container in a campaign
    ///
    /// A 409 answer surfaces as `CreateMailingFailed`. The persistence
    /// callback, if any, runs after the id is recorded; its failures are
    /// logged and never affect the result.
    pub async fn create_mailing_container(
        &self,
        name: &str,
        campaign_id: i64,
        meta: Option<&Value>,
    ) -> Result<MailingContainer> {
        let meta = meta.filter(|m| m.as_object().is_some_and(|o| !o.is_empty()));
        let payload = CreateContainerRequest {
            name,
            campaign_id,
            meta,
        };

        let body = match self.post_json(Operation::CreateContainer, &payload).await {
            Err(AppError::UploadFailed(_)) => {
                return Err(AppError::CreateMailingFailed(
                    "conflict while creating mailing".to_string(),
                ));
            }
            other => other?,
        };

        let mailing_id = extract_mailing_id(&body).ok_or_else(|| {
            AppError::CreateMailingFailed("mailing id not found in response".to_string())
        })?;
        let container = MailingContainer {
            mailing_id,
            campaign_id,
        };

        self.mailing_ids.write().await.push(mailing_id);
        info!("Created mailing {} in campaign {}", mailing_id, campaign_id);
        self.persist(&container);
        Ok(container)
    }

    fn persist(&self, container: &MailingContainer) {
        let Some(callback) = &self.persist_callback else {
            return;
        };
        match catch_unwind(AssertUnwindSafe(|| callback(container))) {
            Ok(Ok(())) => debug!("Persisted mailing {}", container.mailing_id),
            Ok(Err(e)) => error!("Persistence callback failed for mailing {}: {}", container.mailing_id, e),
            Err(_) => error!("Persistence callback panicked for mailing {}", container.mailing_id),
        }
    }

    /// Uploads validated contacts as JSON objects
    ///
    /// Returns the API response as-is; it may report per-contact outcomes.
    pub async fn send_mailing_json(&self, mailing_id: i64, contacts: &[Contact]) -> Result<Value> {
        if contacts.len() > 20 {
            info!("Sending {} contacts to mailing {}", contacts.len(), mailing_id);
        }
        let payload = UploadRequest {
            mailing_id,
            data: contacts,
        };
        self.post_json(Operation::SendJson, &payload).await
    }

    /// Uploads raw JSON objects, validating each through [`Contact`] first
    ///
    /// # Errors
    /// `InputInvalid` for any malformed contact, before any request is sent.
    pub async fn send_mailing_values(&self, mailing_id: i64, contacts: Vec<Value>) -> Result<Value> {
        let contacts = contacts
            .into_iter()
            .map(Contact::from_value)
            .collect::<Result<Vec<_>>>()?;
        self.send_mailing_json(mailing_id, &contacts).await
    }

    /// Uploads rows in the API-defined columnar form, without validation
    pub async fn send_mailing_array<R: Serialize>(&self, mailing_id: i64, rows: &[R]) -> Result<Value> {
        let payload = UploadRequest {
            mailing_id,
            data: rows,
        };
        self.post_json(Operation::SendArray, &payload).await
    }

    /// Uploads a CSV file as a multipart attachment
    ///
    /// The file is read into memory once, after the session check, and the
    /// same bytes are resent on every retry and endpoint candidate.
    ///
    /// # Arguments
    /// * `mailing_id` - Target mailing
    /// * `path` - Local CSV file
    /// * `column_map` - Extra form fields mapping CSV columns to API fields
    ///
    /// # Errors
    /// `UploadFailed` when the file does not exist and `Unauthorized` when not
    /// logged in; nothing is read or sent then.
    pub async fn send_mailing_csv(
        &self,
        mailing_id: i64,
        path: impl AsRef<Path>,
        column_map: Option<&HashMap<String, String>>,
    ) -> Result<Value> {
        let path = path.as_ref();
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(AppError::UploadFailed(format!(
                "CSV file not found: {}",
                path.display()
            )));
        }
        self.auth.token().await?;

        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mailing.csv".to_string());
        debug!("Uploading {} ({} bytes) to mailing {}", file_name, content.len(), mailing_id);

        let mut fields = vec![("mailing_id".to_string(), mailing_id.to_string())];
        if let Some(map) = column_map {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort();
            fields.extend(entries.into_iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        let file = FileAttachment {
            field_name: "file".to_string(),
            file_name,
            content_type: "text/csv".to_string(),
            content,
        };

        let template = RequestTemplate::new(Method::POST)
            .form(fields, Some(file))
            .idempotent();
        self.call(Operation::SendCsv, template).await
    }

    /// Sets the dialing weight of a mailing
    ///
    /// # Errors
    /// `WeightUpdateFailed` when the API answers `"success": false`.
    pub async fn adjust_mailing_weight(&self, mailing_id: i64, weight: i64) -> Result<()> {
        let payload = WeightRequest { mailing_id, weight };
        let body = self.put_json(Operation::AdjustWeight, &payload).await?;
        if !reports_success(&body) {
            return Err(AppError::WeightUpdateFailed(format!(
                "API refused weight {weight} for mailing {mailing_id}"
            )));
        }
        debug!("Mailing {} weight set to {}", mailing_id, weight);
        Ok(())
    }
}

fn handle_response(response: &ApiResponse, operation: Operation) -> Result<Value> {
    match response.status() {
        StatusCode::OK | StatusCode::CREATED => response
            .json()
            .map_err(|e| AppError::InvalidResponse(format!("{operation}: {e}"))),
        status => Err(mailing_status_error(status, operation)),
    }
}
