//! # 3C Plus Client Prelude
//!
//! Imports the types needed for most interactions with the API.
//!
//! ```rust
//! use threec_client::prelude::*;
//!
//! let registry = EndpointRegistry::default();
//! assert!(!registry.candidates(Operation::CreateContainer).is_empty());
//! ```

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Client configuration
pub use crate::application::config::{Config, MailingConfig};

/// Retry configuration
pub use crate::model::retry::RetryConfig;

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type and helpers
pub use crate::error::{AppError, Result as AppResult, UnavailableReason};

// ============================================================================
// CLIENTS
// ============================================================================

/// Authentication client
pub use crate::application::auth::AuthClient;

/// Mailing client and persistence hook types
pub use crate::application::mailing::{BoxError, MailingClient, PersistCallback};

// ============================================================================
// MODELS
// ============================================================================

/// Credentials
pub use crate::model::auth::{Credentials, PartialCredentials};

/// Campaign, contact and mailing models
pub use crate::model::campaign::Campaign;
pub use crate::model::contact::Contact;
pub use crate::model::mailing::MailingContainer;

/// Endpoint registry
pub use crate::model::endpoints::{EndpointRegistry, Operation};

// ============================================================================
// TRANSPORT
// ============================================================================

/// HTTP transport and backend seam
pub use crate::model::http::{
    ApiRequest, ApiResponse, FileAttachment, HttpBackend, OutgoingRequest, RequestBody,
    RequestTemplate, ReqwestBackend, SendError, Transport,
};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json::{Value, json};
pub use std::sync::Arc;
pub use tracing::{debug, error, info, warn};
