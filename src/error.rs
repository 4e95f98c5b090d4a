//! Error types for the 3C Plus client.
//!
//! Every failure surfaced by the auth and mailing clients is an [`AppError`].
//! The `*_status_error` functions are the single place where HTTP status codes
//! are translated into error kinds.

use crate::model::endpoints::Operation;
use reqwest::StatusCode;
use std::fmt;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;

/// Cause recorded when the transport gives up on a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The request did not complete within its timeout
    Timeout,
    /// Connection-level failure before a response was received
    Network(String),
    /// The API answered with a 5xx status
    ServerError(StatusCode),
}

impl UnavailableReason {
    /// True for failures where no HTTP response was received at all.
    #[must_use]
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network(_))
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::ServerError(status) => write!(f, "server returned {status}"),
        }
    }
}

/// Main error type for the library
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The API rejected the login credentials
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The request requires a valid session, or access was denied
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The session token is no longer accepted by the API
    #[error("token expired: {0}")]
    TokenExpired(String),

    /// Transient failure: timeout, network error or 5xx after all retries
    #[error("api unavailable: {0}")]
    ApiUnavailable(UnavailableReason),

    /// The API answered 429
    #[error("rate limit exceeded")]
    RateLimitExceeded,

    /// Caller input or payload rejected (400/422 or local validation)
    #[error("invalid input: {0}")]
    InputInvalid(String),

    /// Endpoint or campaign not found, after every path variant was tried
    #[error("endpoint not found for {0}")]
    CampaignNotFound(Operation),

    /// Mailing container could not be created
    #[error("create mailing failed: {0}")]
    CreateMailingFailed(String),

    /// Contact upload failed (409 conflict or missing file)
    #[error("upload failed: {0}")]
    UploadFailed(String),

    /// Mailing weight update was refused
    #[error("weight update failed: {0}")]
    WeightUpdateFailed(String),

    /// Login answered 2xx but the body carries no token
    #[error("token not found in authentication response")]
    TokenNotFound,

    /// An operation has no candidate endpoint paths
    #[error("endpoint not configured for {0}")]
    EndpointNotConfigured(Operation),

    /// A successful response carried a body that is not valid JSON
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Status code with no specific mapping
    #[error("unexpected status {status} during {context}")]
    Unexpected {
        /// Raw status returned by the API
        status: StatusCode,
        /// Operation that produced it
        context: String,
    },

    /// JSON (de)serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    /// True for `Unauthorized` and its specialization `TokenExpired`.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::TokenExpired(_))
    }

    /// True only for failures a caller may blindly retry after a delay.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ApiUnavailable(_))
    }

    /// Raw status code for `Unexpected` errors.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unexpected { status, .. } => Some(*status),
            Self::ApiUnavailable(UnavailableReason::ServerError(status)) => Some(*status),
            _ => None,
        }
    }
}

/// Maps a non-2xx answer to the login call.
///
/// `message` is the vendor-provided explanation, used for 400/422.
#[must_use]
pub fn login_status_error(status: StatusCode, message: String) -> AppError {
    match status.as_u16() {
        400 | 422 => AppError::InputInvalid(message),
        401 => AppError::InvalidCredentials,
        429 => AppError::RateLimitExceeded,
        s if s >= 500 => AppError::ApiUnavailable(UnavailableReason::ServerError(status)),
        _ => AppError::Unexpected {
            status,
            context: "login".to_string(),
        },
    }
}

/// Maps a non-200 answer to the session check and logout calls.
#[must_use]
pub fn session_status_error(status: StatusCode, context: &str) -> AppError {
    match status.as_u16() {
        401 => AppError::TokenExpired("token expired or invalid".to_string()),
        403 => AppError::Unauthorized("access denied".to_string()),
        429 => AppError::RateLimitExceeded,
        s if s >= 500 => AppError::ApiUnavailable(UnavailableReason::ServerError(status)),
        _ => AppError::Unexpected {
            status,
            context: context.to_string(),
        },
    }
}

/// Maps a non-success answer to any mailing operation.
#[must_use]
pub fn mailing_status_error(status: StatusCode, operation: Operation) -> AppError {
    match status.as_u16() {
        400 | 422 => AppError::InputInvalid(format!("payload rejected by {operation}")),
        401 | 403 => AppError::Unauthorized("not authorized".to_string()),
        404 => AppError::CampaignNotFound(operation),
        409 => AppError::UploadFailed("duplicate data".to_string()),
        429 => AppError::RateLimitExceeded,
        s if s >= 500 => AppError::ApiUnavailable(UnavailableReason::ServerError(status)),
        _ => AppError::Unexpected {
            status,
            context: operation.to_string(),
        },
    }
}
