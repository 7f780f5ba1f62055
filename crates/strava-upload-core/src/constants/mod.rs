// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Provider endpoints, OAuth protocol values, and store layout constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// OAuth provider constants and protocol values
pub mod oauth;
/// Credential store layout and connection defaults
pub mod store;

pub use oauth::*;
