// ABOUTME: Activity creation on behalf of the configured athlete
// ABOUTME: Exposes the dispatcher that forwards manual-upload forms to Strava

//! Activity upload
//!
//! The dispatcher obtains a valid access token from the
//! [`TokenManager`](crate::oauth2_client::TokenManager) and forwards the
//! caller's form fields unchanged to the activity-creation endpoint.

/// Authenticated activity dispatch
pub mod dispatcher;

pub use dispatcher::{ActivityDispatcher, CreatedActivity};
