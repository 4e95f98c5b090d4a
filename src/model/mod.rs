/// Credentials and login response parsing
pub mod auth;
/// Campaign listing model
pub mod campaign;
/// Contact model with phone validation
pub mod contact;
/// Endpoint registry for mailing operations
pub mod endpoints;
/// HTTP transport with retry and shared authorization state
pub mod http;
/// Mailing container and upload payloads
pub mod mailing;
/// Retry configuration for HTTP requests
pub mod retry;
