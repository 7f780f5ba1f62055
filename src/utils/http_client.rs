// ABOUTME: Outbound HTTP client builders with bounded timeouts
// ABOUTME: Separate clients for the OAuth token endpoint and the activity API

use crate::config::HttpClientConfig;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default client if the builder fails (TLS backend init).
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .user_agent(concat!("easy-strava-upload/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Client for token exchanges, which should be fast
#[must_use]
pub fn oauth_client(config: &HttpClientConfig) -> Client {
    create_client_with_timeout(config.oauth_timeout_secs, config.oauth_connect_timeout_secs)
}

/// Client for activity API calls
#[must_use]
pub fn api_client(config: &HttpClientConfig) -> Client {
    create_client_with_timeout(config.api_timeout_secs, config.api_connect_timeout_secs)
}
