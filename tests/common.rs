// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides mock-provider wiring, a recording credential store, and quiet logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `easy_strava_upload`

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use easy_strava_upload::{
    activities::ActivityDispatcher,
    config::StravaConfig,
    errors::StoreError,
    models::{AthleteIdentity, CredentialRecord},
    oauth2_client::{ExpiryPolicy, TokenCache, TokenManager, TokenRefresher},
    resources::ServerResources,
    store::{CredentialStore, InMemoryStore},
};
use wiremock::MockServer;

static INIT_LOGGER: Once = Once::new();

/// Path the mock provider serves the token endpoint on
pub const TOKEN_PATH: &str = "/oauth/token";

/// Path the mock provider serves the activity endpoint on
pub const ACTIVITIES_PATH: &str = "/api/v3/activities";

/// Seed refresh token configured for every test
pub const SEED_REFRESH_TOKEN: &str = "R-seed";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Athlete used across tests
pub fn athlete() -> AthleteIdentity {
    AthleteIdentity::new("1232742", "alan_diaz")
}

/// Current Unix time in seconds
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Record holding `access_token` valid until `expires_at`
pub fn record(access_token: &str, refresh_token: &str, expires_at: i64) -> CredentialRecord {
    CredentialRecord {
        access_token: access_token.to_owned(),
        expires_at,
        expires_in: 3600,
        ..CredentialRecord::seed(&athlete(), refresh_token, vec!["activity:write".to_owned()])
    }
}

/// Strava configuration pointing at `base_uri`
pub fn strava_config(base_uri: &str) -> StravaConfig {
    let mut config = StravaConfig::new("test-client", "test-secret", SEED_REFRESH_TOKEN);
    config.token_url = format!("{base_uri}{TOKEN_PATH}");
    config.api_base_url = format!("{base_uri}/api/v3");
    config
}

/// Token manager over `store` talking to the mock provider
pub fn token_manager(server: &MockServer, store: Arc<dyn CredentialStore>) -> Arc<TokenManager> {
    let config = strava_config(&server.uri());
    Arc::new(TokenManager::new(
        TokenCache::new(store),
        TokenRefresher::new(reqwest::Client::new(), &config),
        ExpiryPolicy::strict(),
        SEED_REFRESH_TOKEN,
        config.scopes,
    ))
}

/// Dispatcher over `store` talking to the mock provider
pub fn dispatcher(server: &MockServer, store: Arc<dyn CredentialStore>) -> ActivityDispatcher {
    let config = strava_config(&server.uri());
    ActivityDispatcher::new(
        token_manager(server, store),
        reqwest::Client::new(),
        config.activities_url(),
    )
}

/// Server resources over `store` talking to the mock provider
pub fn server_resources(server: &MockServer, store: Arc<dyn CredentialStore>) -> Arc<ServerResources> {
    let dispatcher = dispatcher(server, Arc::clone(&store));
    Arc::new(ServerResources {
        athlete: athlete(),
        tokens: Arc::clone(dispatcher.tokens()),
        dispatcher: Arc::new(dispatcher),
        store,
    })
}

/// Shared, ordered log of observable side effects
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    /// Append an event
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// In-memory store that records every write in an [`EventLog`]
#[derive(Clone)]
pub struct RecordingStore {
    inner: InMemoryStore,
    log: EventLog,
}

impl RecordingStore {
    /// Create a recording store writing to `log`
    pub fn new(log: EventLog) -> Self {
        Self {
            inner: InMemoryStore::new(),
            log,
        }
    }
}

#[async_trait]
impl CredentialStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.inner.set(key, value).await?;
        let stored: CredentialRecord = serde_json::from_slice(value).unwrap();
        self.log
            .push(format!("store:{}:{}", stored.access_token, stored.refresh_token));
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

/// Store whose every operation fails
pub struct FailingStore;

#[async_trait]
impl CredentialStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::Backend("connection refused".to_owned()))
    }

    async fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".to_owned()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".to_owned()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Base URL of a local port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Store whose reads fail while writes are recorded in an [`EventLog`]
pub struct UnreadableStore {
    log: EventLog,
}

impl UnreadableStore {
    /// Create a store recording write attempts to `log`
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl CredentialStore for UnreadableStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::Backend("read timed out".to_owned()))
    }

    async fn set(&self, key: &str, _value: &[u8]) -> Result<(), StoreError> {
        self.log.push(format!("store:{key}"));
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "unreadable"
    }
}
