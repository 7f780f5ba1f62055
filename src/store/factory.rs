// ABOUTME: Credential store factory for environment-based backend selection
// ABOUTME: Redis when a connection URL is configured, in-memory otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CredentialStore, InMemoryStore, RedisStore};
use crate::config::StoreConfig;
use std::sync::Arc;
use strava_upload_core::errors::StoreError;

/// Create the credential store described by `config`
///
/// # Errors
///
/// Returns an error if the Redis backend is selected and cannot be reached
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn CredentialStore>, StoreError> {
    match config.connection_url() {
        Some(url) => {
            let store = RedisStore::connect(&url, &config.redis_connection).await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!(
                "No Redis configured; credentials are kept in memory and lost on restart"
            );
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}
