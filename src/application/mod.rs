/// Authentication client
pub mod auth;
/// Application configuration module
pub mod config;
/// Mailing client
pub mod mailing;
