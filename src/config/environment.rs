// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, provider credentials, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use super::store::StoreConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;
use strava_upload_core::constants::oauth;
use strava_upload_core::models::AthleteIdentity;
use tracing::info;

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8090;

/// Environment type for logging and other configurations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Strava application credentials and endpoints
///
/// Immutable after startup. The seed refresh token is only used while no
/// credential record exists for the athlete; once a record is cached its
/// refresh token wins.
#[derive(Clone, Serialize, Deserialize)]
pub struct StravaConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    #[serde(skip_serializing)]
    pub client_secret: String,
    /// Refresh token used before any credential record exists
    #[serde(skip_serializing)]
    pub initial_refresh_token: String,
    /// Scopes recorded on refreshed credentials
    pub scopes: Vec<String>,
    /// OAuth token endpoint
    pub token_url: String,
    /// REST API base URL
    pub api_base_url: String,
    /// Seconds before `expires_at` at which a token is already treated as expired
    pub expiry_grace_secs: i64,
}

impl StravaConfig {
    /// Create a configuration pointing at the public Strava endpoints
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        initial_refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            initial_refresh_token: initial_refresh_token.into(),
            scopes: default_scopes(),
            token_url: oauth::STRAVA_TOKEN_URL.to_owned(),
            api_base_url: oauth::STRAVA_API_BASE_URL.to_owned(),
            expiry_grace_secs: 0,
        }
    }

    /// Load Strava configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a number fails to parse
    pub fn from_env() -> Result<Self> {
        let scopes = env::var("STRAVA_SCOPES")
            .map(|s| parse_scopes(&s))
            .ok()
            .filter(|scopes| !scopes.is_empty())
            .unwrap_or_else(default_scopes);

        Ok(Self {
            client_id: required_var("STRAVA_CLIENT_ID")?,
            client_secret: required_var("STRAVA_CLIENT_SECRET")?,
            initial_refresh_token: required_var("STRAVA_REFRESH_TOKEN")?,
            scopes,
            token_url: env_var_or("STRAVA_TOKEN_URL", oauth::STRAVA_TOKEN_URL),
            api_base_url: env_var_or("STRAVA_API_BASE_URL", oauth::STRAVA_API_BASE_URL),
            expiry_grace_secs: env_var_or("STRAVA_EXPIRY_GRACE_SECS", "0")
                .parse()
                .context("Invalid STRAVA_EXPIRY_GRACE_SECS value")?,
        })
    }

    /// Activity-creation endpoint
    #[must_use]
    pub fn activities_url(&self) -> String {
        format!(
            "{}{}",
            self.api_base_url.trim_end_matches('/'),
            oauth::ACTIVITIES_PATH
        )
    }

    /// First 8 hex chars of the SHA-256 of the client secret
    ///
    /// Lets operators compare secrets across deployments without logging them.
    #[must_use]
    pub fn secret_fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.client_secret.as_bytes());
        let result = hasher.finalize();
        format!("{result:x}").chars().take(8).collect()
    }
}

impl std::fmt::Debug for StravaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StravaConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.secret_fingerprint())
            .field("initial_refresh_token", &"<redacted>")
            .field("scopes", &self.scopes)
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("expiry_grace_secs", &self.expiry_grace_secs)
            .finish()
    }
}

/// Outbound HTTP client timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Request timeout for the token endpoint
    pub oauth_timeout_secs: u64,
    /// Connect timeout for the token endpoint
    pub oauth_connect_timeout_secs: u64,
    /// Request timeout for API calls
    pub api_timeout_secs: u64,
    /// Connect timeout for API calls
    pub api_connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            oauth_timeout_secs: 15,
            oauth_connect_timeout_secs: 5,
            api_timeout_secs: 60,
            api_connect_timeout_secs: 10,
        }
    }
}

impl HttpClientConfig {
    /// Load client timeouts from environment
    ///
    /// # Errors
    ///
    /// Returns an error if a value fails to parse
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            oauth_timeout_secs: env_var_or(
                "OAUTH_HTTP_TIMEOUT_SECS",
                &defaults.oauth_timeout_secs.to_string(),
            )
            .parse()
            .context("Invalid OAUTH_HTTP_TIMEOUT_SECS value")?,
            oauth_connect_timeout_secs: env_var_or(
                "OAUTH_HTTP_CONNECT_TIMEOUT_SECS",
                &defaults.oauth_connect_timeout_secs.to_string(),
            )
            .parse()
            .context("Invalid OAUTH_HTTP_CONNECT_TIMEOUT_SECS value")?,
            api_timeout_secs: env_var_or(
                "API_HTTP_TIMEOUT_SECS",
                &defaults.api_timeout_secs.to_string(),
            )
            .parse()
            .context("Invalid API_HTTP_TIMEOUT_SECS value")?,
            api_connect_timeout_secs: env_var_or(
                "API_HTTP_CONNECT_TIMEOUT_SECS",
                &defaults.api_connect_timeout_secs.to_string(),
            )
            .parse()
            .context("Invalid API_HTTP_CONNECT_TIMEOUT_SECS value")?,
        })
    }
}

/// Cross-origin settings for the upload form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Top-level service configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Inbound request timeout in seconds
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests on shutdown
    pub shutdown_timeout_secs: u64,
    /// Deployment environment
    pub environment: Environment,
    /// Athlete whose credentials are managed
    pub athlete: AthleteIdentity,
    /// Strava application settings
    pub strava: StravaConfig,
    /// Credential store backend
    pub store: StoreConfig,
    /// Outbound HTTP timeouts
    pub http_client: HttpClientConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails to parse
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        Ok(Self {
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            request_timeout_secs: env_var_or("HTTP_REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .context("Invalid HTTP_REQUEST_TIMEOUT_SECS value")?,
            shutdown_timeout_secs: env_var_or("HTTP_SHUTDOWN_TIMEOUT_SECS", "20")
                .parse()
                .context("Invalid HTTP_SHUTDOWN_TIMEOUT_SECS value")?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            athlete: AthleteIdentity::new(
                env_var_or("STRAVA_ATHLETE_ID", oauth::DEFAULT_ATHLETE_ID),
                env_var_or("STRAVA_ATHLETE_USERNAME", oauth::DEFAULT_ATHLETE_USERNAME),
            ),
            strava: StravaConfig::from_env()?,
            store: StoreConfig::from_env(),
            http_client: HttpClientConfig::from_env()?,
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
        })
    }

    /// Secret-free configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Easy Strava Upload Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Athlete: {}\n\
             - Strava Client ID: {}\n\
             - Strava Client Secret: sha256:{}\n\
             - Strava Scopes: {}\n\
             - Token Endpoint: {}\n\
             - Activities Endpoint: {}\n\
             - Credential Store: {}\n\
             - CORS Origins: {}",
            self.http_port,
            self.environment,
            self.athlete,
            self.strava.client_id,
            self.strava.secret_fingerprint(),
            self.strava.scopes.join(","),
            self.strava.token_url,
            self.strava.activities_url(),
            self.store.backend_name(),
            self.cors.allowed_origins,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Get a required, non-empty environment variable
fn required_var(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => bail!("Environment variable {key} is empty"),
        Err(_) => bail!("Environment variable {key} is not set"),
    }
}

fn default_scopes() -> Vec<String> {
    oauth::DEFAULT_STRAVA_SCOPES
        .iter()
        .map(|s| (*s).to_owned())
        .collect()
}

/// Parse comma-separated scopes
fn parse_scopes(scopes_str: &str) -> Vec<String> {
    scopes_str
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scopes() {
        assert_eq!(
            parse_scopes("activity:write, read,,"),
            vec!["activity:write".to_owned(), "read".to_owned()]
        );
        assert!(parse_scopes(" , ").is_empty());
    }

    #[test]
    fn test_activities_url_joins_base() {
        let mut config = StravaConfig::new("id", "secret", "seed");
        assert_eq!(
            config.activities_url(),
            "https://www.strava.com/api/v3/activities"
        );

        config.api_base_url = "http://127.0.0.1:9999/api/v3/".to_owned();
        assert_eq!(
            config.activities_url(),
            "http://127.0.0.1:9999/api/v3/activities"
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = StravaConfig::new("id", "very-secret", "seed-token");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("seed-token"));
        assert_eq!(config.secret_fingerprint().len(), 8);
    }
}
