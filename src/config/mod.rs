// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Loads provider credentials, store backend, HTTP, and CORS settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: server, Strava, HTTP client, and CORS settings
//! - **Store**: credential store backend selection and Redis tuning

/// Environment and server configuration
pub mod environment;
/// Credential store configuration
pub mod store;

pub use environment::{CorsConfig, Environment, HttpClientConfig, ServerConfig, StravaConfig};
pub use store::{RedisConnectionConfig, StoreConfig};
