// ABOUTME: Error types for the key-value credential store
// ABOUTME: Covers backend I/O failures, encoding failures, and backend misconfiguration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Credential store failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Backend read or write failed
    #[error("credential store backend error: {0}")]
    Backend(String),

    /// Record could not be encoded for storage
    #[error("credential record serialization failed: {0}")]
    Serialization(String),

    /// Backend could not be constructed from configuration
    #[error("credential store misconfigured: {0}")]
    Config(String),
}
