// ABOUTME: Error types for OAuth token refresh against the provider token endpoint
// ABOUTME: Separates transport failures, provider rejections, and unparsable responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::TransportSource;

/// Failure modes of a `grant_type=refresh_token` exchange
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The token endpoint could not be reached
    #[error("token endpoint unreachable: {0}")]
    Network(#[source] TransportSource),

    /// The token endpoint answered with a non-success status
    #[error("token endpoint rejected refresh with HTTP {status}")]
    ProviderRejected {
        /// HTTP status code returned by the provider
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// The token endpoint answered 2xx but the body was not a token response
    #[error("token endpoint returned an unparsable body (HTTP {status}): {reason}")]
    Malformed {
        /// HTTP status code returned by the provider
        status: u16,
        /// Parser error description
        reason: String,
    },
}

impl RefreshError {
    /// HTTP status carried by the error, if the provider answered at all
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Network(_) => None,
            Self::ProviderRejected { status, .. } | Self::Malformed { status, .. } => {
                Some(*status)
            }
        }
    }
}

#[cfg(feature = "provider-errors")]
impl From<reqwest::Error> for RefreshError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(Box::new(error))
    }
}
