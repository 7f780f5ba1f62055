// ABOUTME: Error taxonomy for posting an activity on behalf of an athlete
// ABOUTME: Wraps refresh and store failures so callers can tell auth problems from transport ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{RefreshError, StoreError, TransportSource};

/// Failure of an authenticated activity dispatch
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The activity endpoint could not be reached
    #[error("activity endpoint unreachable: {0}")]
    Network(#[source] TransportSource),

    /// The activity endpoint answered with something other than `201 Created`
    #[error("activity endpoint rejected request with HTTP {status}")]
    ProviderRejected {
        /// HTTP status code returned by the provider
        status: u16,
    },

    /// A usable access token could not be obtained
    #[error("authorization failed: {0}")]
    AuthFailed(#[source] RefreshError),

    /// A refreshed credential could not be persisted
    #[error("credential persistence failed: {0}")]
    StoreFailure(#[source] StoreError),

    /// The outbound request could not be built
    #[error("malformed activity request: {0}")]
    Malformed(String),
}

impl DispatchError {
    /// HTTP status carried by the error, if a provider answered at all
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ProviderRejected { status } => Some(*status),
            Self::AuthFailed(refresh) => refresh.status(),
            Self::Network(_) | Self::StoreFailure(_) | Self::Malformed(_) => None,
        }
    }
}

impl From<RefreshError> for DispatchError {
    fn from(error: RefreshError) -> Self {
        Self::AuthFailed(error)
    }
}

impl From<StoreError> for DispatchError {
    fn from(error: StoreError) -> Self {
        Self::StoreFailure(error)
    }
}

#[cfg(feature = "provider-errors")]
impl From<reqwest::Error> for DispatchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            Self::Malformed(error.to_string())
        } else {
            Self::Network(Box::new(error))
        }
    }
}
