//! # threec-client
//!
//! Client for the 3C Plus call-center REST API.
//!
//! Two clients share one HTTP transport:
//!
//! - [`AuthClient`](application::auth::AuthClient) logs in, checks and ends
//!   the session, and holds the bearer token in memory.
//! - [`MailingClient`](application::mailing::MailingClient) lists campaigns,
//!   creates mailing containers, uploads contacts and adjusts mailing weight,
//!   always using the auth client's current token.
//!
//! Transient failures (timeouts, network errors, 5xx) are retried with
//! exponential backoff before surfacing as
//! [`AppError::ApiUnavailable`](error::AppError::ApiUnavailable). Mailing
//! operations try every known path spelling of their endpoint before giving up.
//!
//! ## Example
//!
//! ```rust,no_run
//! use threec_client::prelude::*;
//!
//! # async fn run() -> Result<(), AppError> {
//! setup_logger();
//! let auth = Arc::new(AuthClient::new(Config::new())?);
//! auth.login(PartialCredentials::from_env()).await?;
//!
//! let mailing = MailingClient::new(auth.clone(), MailingConfig::new());
//! let campaigns = mailing.list_campaigns(Some("vendas"), true).await?;
//! if let Some(id) = campaigns.first().and_then(Campaign::id) {
//!     let container = mailing.create_mailing_container("Lote 1", id, None).await?;
//!     let contact = Contact::new(["5511999990000"])?.with_name("Maria");
//!     mailing.send_mailing_json(container.mailing_id, &[contact]).await?;
//!     mailing.adjust_mailing_weight(container.mailing_id, 5).await?;
//! }
//! auth.logout().await?;
//! # Ok(())
//! # }
//! ```

/// Auth and mailing clients plus their configuration
pub mod application;
/// Global constants
pub mod constants;
/// Error taxonomy and status mapping
pub mod error;
/// Data models and the HTTP transport
pub mod model;
/// Convenient re-exports
pub mod prelude;
/// Environment, id and logging helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
