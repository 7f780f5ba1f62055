// ABOUTME: Error types for the service crate
// ABOUTME: Re-exports the error taxonomy defined in the core crate

//! # Unified Error Handling System
//!
//! See [`strava_upload_core::errors`] for the definitions.

pub use strava_upload_core::errors::{
    AppError, AppResult, DispatchError, ErrorCode, ErrorResponse, ErrorResponseDetails,
    RefreshError, StoreError, TransportSource,
};
