// ABOUTME: Credential store configuration types
// ABOUTME: Selects the Redis or in-memory backend and carries Redis connection tuning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::env;
use strava_upload_core::constants::store;

/// Credential store configuration
///
/// When neither `REDIS_URL` nor `REDIS_ADDRESS` is set the service falls back
/// to the in-memory store, which loses credentials on restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Full Redis URL, takes precedence over the address/password/db triple
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Redis `host:port`
    #[serde(default)]
    pub redis_address: Option<String>,
    /// Redis password
    #[serde(default, skip_serializing)]
    pub redis_password: Option<String>,
    /// Redis logical database index
    #[serde(default)]
    pub redis_db: i64,
    /// Redis connection tuning
    #[serde(default)]
    pub redis_connection: RedisConnectionConfig,
}

impl StoreConfig {
    /// Load store configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            redis_url: non_empty_var("REDIS_URL"),
            redis_address: non_empty_var("REDIS_ADDRESS"),
            redis_password: non_empty_var("REDIS_PASSWORD"),
            redis_db: env::var("REDIS_DB")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            redis_connection: RedisConnectionConfig::from_env(),
        }
    }

    /// Connection URL for the Redis backend, `None` selects the in-memory store
    #[must_use]
    pub fn connection_url(&self) -> Option<String> {
        if let Some(url) = &self.redis_url {
            return Some(url.clone());
        }

        self.redis_address.as_ref().map(|address| {
            let auth = self
                .redis_password
                .as_ref()
                .map_or_else(String::new, |password| format!(":{password}@"));
            format!("redis://{auth}{address}/{}", self.redis_db)
        })
    }

    /// Backend name for startup logs
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        if self.connection_url().is_some() {
            "redis"
        } else {
            "memory"
        }
    }
}

/// Redis connection and retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConnectionConfig {
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
    /// Response/command timeout in seconds
    pub response_timeout_secs: u64,
    /// Number of reconnection retries after connection drop
    pub reconnection_retries: usize,
    /// Exponential backoff base for retry delays
    pub retry_exponent_base: u64,
    /// Maximum retry delay in milliseconds
    pub max_retry_delay_ms: u64,
    /// Number of retries for initial connection at startup
    pub initial_connection_retries: u32,
    /// Initial retry delay in milliseconds (doubles with exponential backoff)
    pub initial_retry_delay_ms: u64,
}

impl Default for RedisConnectionConfig {
    fn default() -> Self {
        Self {
            connection_timeout_secs: store::REDIS_CONNECT_TIMEOUT_SECS,
            response_timeout_secs: store::REDIS_RESPONSE_TIMEOUT_SECS,
            reconnection_retries: store::REDIS_RECONNECTION_RETRIES,
            retry_exponent_base: store::REDIS_RETRY_EXPONENT_BASE,
            max_retry_delay_ms: store::REDIS_MAX_RETRY_DELAY_MS,
            initial_connection_retries: store::REDIS_INITIAL_CONNECTION_RETRIES,
            initial_retry_delay_ms: store::REDIS_INITIAL_RETRY_DELAY_MS,
        }
    }
}

impl RedisConnectionConfig {
    /// Load Redis connection configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            connection_timeout_secs: parsed_var("REDIS_CONNECTION_TIMEOUT_SECS")
                .unwrap_or(defaults.connection_timeout_secs),
            response_timeout_secs: parsed_var("REDIS_RESPONSE_TIMEOUT_SECS")
                .unwrap_or(defaults.response_timeout_secs),
            reconnection_retries: parsed_var("REDIS_RECONNECTION_RETRIES")
                .unwrap_or(defaults.reconnection_retries),
            retry_exponent_base: parsed_var("REDIS_RETRY_EXPONENT_BASE")
                .unwrap_or(defaults.retry_exponent_base),
            max_retry_delay_ms: parsed_var("REDIS_MAX_RETRY_DELAY_MS")
                .unwrap_or(defaults.max_retry_delay_ms),
            initial_connection_retries: parsed_var("REDIS_INITIAL_CONNECTION_RETRIES")
                .unwrap_or(defaults.initial_connection_retries),
            initial_retry_delay_ms: parsed_var("REDIS_INITIAL_RETRY_DELAY_MS")
                .unwrap_or(defaults.initial_retry_delay_ms),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parsed_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
