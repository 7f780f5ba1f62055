// ABOUTME: Key-value credential store abstraction with pluggable backends
// ABOUTME: Opaque get/set byte storage used by the token cache (Redis or in-memory)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Store factory selecting the backend from configuration
pub mod factory;
/// In-memory store implementation
pub mod memory;
/// Redis store implementation
pub mod redis;

pub use factory::create_store;
pub use memory::InMemoryStore;
pub use self::redis::RedisStore;

use strava_upload_core::errors::StoreError;

/// Opaque persistent key to bytes mapping
///
/// Values are written verbatim and never expire; a `set` on an existing key
/// replaces the previous value unconditionally.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the bytes stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Verify the backend is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the health check fails
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
