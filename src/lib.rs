// ABOUTME: Main library entry point for the Easy Strava Upload service
// ABOUTME: Keeps an athlete's Strava OAuth credentials usable and forwards manual activity uploads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Easy Strava Upload
//!
//! A small HTTP service that creates manual Strava activities on behalf of
//! one configured athlete. Strava access tokens are short-lived and refresh
//! tokens rotate on every use, so the service persists the current
//! credential record and refreshes it on demand.
//!
//! ## Architecture
//!
//! - **Store**: key-value backend holding the credential record (Redis or in-memory)
//! - **`OAuth2` client**: token cache, expiry policy, refresher, and the single-flight token manager
//! - **Activities**: dispatcher that posts forms with a valid bearer token
//! - **Routes**: `axum` HTTP surface
//! - **Config**: environment-driven configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use easy_strava_upload::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Easy Strava Upload configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Activity creation on behalf of the configured athlete
pub mod activities;

/// Configuration management
pub mod config;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// `OAuth2` client: credential cache, refresh, and single-flight token lifecycle
pub mod oauth2_client;

/// Shared resources for HTTP handlers
pub mod resources;

/// HTTP routes
pub mod routes;

/// Credential store backends
pub mod store;

/// Utility helpers
pub mod utils;

/// Core models re-exported from the core crate
pub use strava_upload_core::models;

/// Constants re-exported from the core crate
pub use strava_upload_core::constants;
