// ABOUTME: OAuth 2.0 client for keeping an athlete's Strava credentials usable
// ABOUTME: Credential cache, refresh-token exchange, expiry policy, and single-flight refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth 2.0 Client Module
//!
//! The service acts as an OAuth 2.0 client of Strava on behalf of one
//! configured athlete. This module handles:
//! - persisting the credential record in the key-value store
//! - deciding when the cached access token is no longer usable
//! - exchanging the rotating refresh token for a new credential set
//! - serializing refreshes per athlete so a rotated token is never reused

/// Access-token expiry decision
pub mod expiry;
/// Refresh-token exchange against the provider token endpoint
pub mod refresher;
/// Credential record persistence
pub mod token_cache;
/// Single-flight token lifecycle coordinator
pub mod token_manager;

pub use expiry::ExpiryPolicy;
pub use refresher::TokenRefresher;
pub use token_cache::TokenCache;
pub use token_manager::TokenManager;
