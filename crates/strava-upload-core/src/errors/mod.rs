// ABOUTME: Unified error handling with standard error codes and HTTP status mapping
// ABOUTME: Defines AppError plus the refresh, store, and dispatch error taxonomies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Library components return the narrow domain errors (`RefreshError`,
//! `StoreError`, `DispatchError`). The HTTP surface converts them into an
//! [`AppError`], which carries an [`ErrorCode`] and knows its HTTP status.

/// Activity dispatch errors
pub mod dispatch;
/// OAuth token refresh errors
pub mod oauth;
/// Credential store errors
pub mod store;

pub use dispatch::DispatchError;
pub use oauth::RefreshError;
pub use store::StoreError;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Boxed transport error source shared by the refresh and dispatch taxonomies
pub type TransportSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // External Services (5000-5999)
    /// Provider answered with a non-success status or an unusable body
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Provider could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// Token refresh against the provider failed
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,

    // Internal Errors (9000-9999)
    /// Credential store failure
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            // Upstream said no: bad gateway
            Self::ExternalServiceError | Self::ExternalAuthFailed => 502,
            // Upstream unreachable
            Self::ExternalServiceUnavailable => 503,
            Self::StorageError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ExternalServiceError => "The fitness provider rejected the request",
            Self::ExternalServiceUnavailable => "The fitness provider is currently unreachable",
            Self::ExternalAuthFailed => "Authorization with the fitness provider failed",
            Self::StorageError => "Credential storage operation failed",
        }
    }
}

/// Unified error type for the service layer
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<TransportSource>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Body of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message.clone(),
            },
        }
    }
}

impl From<DispatchError> for AppError {
    fn from(error: DispatchError) -> Self {
        let code = match &error {
            DispatchError::Network(_) => ErrorCode::ExternalServiceUnavailable,
            DispatchError::AuthFailed(_) => ErrorCode::ExternalAuthFailed,
            DispatchError::ProviderRejected { .. } | DispatchError::Malformed(_) => {
                ErrorCode::ExternalServiceError
            }
            DispatchError::StoreFailure(_) => ErrorCode::StorageError,
        };
        Self::new(code, error.to_string())
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error.code = ?self.code, "{}", self);
        }
        (status, axum::Json(ErrorResponse::from(&self))).into_response()
    }
}
