// ABOUTME: Core data models shared by the credential cache and the dispatcher
// ABOUTME: Credential records and athlete identities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Persisted OAuth credential record
pub mod credential;

pub use credential::{AthleteIdentity, CredentialRecord};
