// ABOUTME: Core types and constants for the easy-strava-upload service
// ABOUTME: Foundation crate with the error taxonomy, credential model, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Strava Upload Core
//!
//! Shared types for the upload service. This crate changes rarely, which keeps
//! the service crate's incremental builds cheap.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the refresh/store/dispatch taxonomies
//! - **models**: `CredentialRecord` and `AthleteIdentity`
//! - **constants**: provider endpoints and store layout

/// Application constants organized by domain
pub mod constants;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Core data models
pub mod models;
