// ABOUTME: Redis credential store with connection management and startup retry
// ABOUTME: Persists credential records so rotated refresh tokens survive restarts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::CredentialStore;
use crate::config::RedisConnectionConfig;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use std::time::Duration;
use strava_upload_core::errors::StoreError;
use tracing::{error, info, warn};

/// Redis credential store
///
/// Uses a `ConnectionManager`, which reconnects transparently after a drop.
/// Keys are written without expiry.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis at `redis_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or every connection attempt fails
    pub async fn connect(
        redis_url: &str,
        conn_config: &RedisConnectionConfig,
    ) -> Result<Self, StoreError> {
        info!(
            "Connecting to Redis (timeout={}s, response_timeout={}s, retries={})",
            conn_config.connection_timeout_secs,
            conn_config.response_timeout_secs,
            conn_config.initial_connection_retries
        );

        let client = redis::Client::open(redis_url)
            .map_err(|e| StoreError::Config(format!("Failed to create Redis client: {e}")))?;

        let manager = Self::connect_with_retry(&client, conn_config).await?;

        info!("Successfully connected to Redis");

        Ok(Self { manager })
    }

    /// Connect to Redis with exponential backoff retry on failure
    async fn connect_with_retry(
        client: &redis::Client,
        conn_config: &RedisConnectionConfig,
    ) -> Result<ConnectionManager, StoreError> {
        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(Duration::from_secs(conn_config.connection_timeout_secs))
            .set_response_timeout(Duration::from_secs(conn_config.response_timeout_secs))
            .set_number_of_retries(conn_config.reconnection_retries)
            .set_exponent_base(conn_config.retry_exponent_base)
            .set_max_delay(conn_config.max_retry_delay_ms);

        let max_retries = conn_config.initial_connection_retries;
        let mut delay_ms = conn_config.initial_retry_delay_ms;
        let mut last_error = None;

        for attempt in 0..=max_retries {
            match ConnectionManager::new_with_config(client.clone(), manager_config.clone()).await {
                Ok(manager) => {
                    if attempt > 0 {
                        info!("Redis connection established after {} retries", attempt);
                    }
                    return Ok(manager);
                }
                Err(e) => {
                    if attempt < max_retries {
                        warn!(
                            "Redis connection attempt {}/{} failed, retrying in {}ms: {}",
                            attempt + 1,
                            max_retries + 1,
                            delay_ms,
                            e
                        );
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                        delay_ms = (delay_ms * 2).min(conn_config.max_retry_delay_ms);
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(StoreError::Backend(format!(
            "Failed to connect to Redis after {} attempts: {}",
            max_retries + 1,
            last_error.map_or_else(|| "unknown error".to_owned(), |e| e.to_string())
        )))
    }
}

#[async_trait::async_trait]
impl CredentialStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.manager.clone();

        conn.get::<_, Option<Vec<u8>>>(key).await.map_err(|e| {
            error!("Redis GET operation failed: {}", e);
            StoreError::Backend(format!("GET {key}: {e}"))
        })
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();

        conn.set::<_, _, ()>(key, value.to_vec()).await.map_err(|e| {
            error!("Redis SET operation failed: {}", e);
            StoreError::Backend(format!("SET {key}: {e}"))
        })
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();

        let response: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Redis PING failed: {}", e);
                StoreError::Backend(format!("PING: {e}"))
            })?;

        if response == "PONG" {
            Ok(())
        } else {
            Err(StoreError::Backend(format!(
                "unexpected PING response '{response}'"
            )))
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
