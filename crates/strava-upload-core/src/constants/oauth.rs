// ABOUTME: OAuth-related constants for the Strava provider
// ABOUTME: Endpoint URLs, grant type, default scopes, and the default athlete identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Provider name used in logs and error messages
pub const STRAVA: &str = "strava";

/// Strava OAuth token endpoint
pub const STRAVA_TOKEN_URL: &str = "https://www.strava.com/oauth/token";

/// Strava REST API base URL
pub const STRAVA_API_BASE_URL: &str = "https://www.strava.com/api/v3";

/// Path of the activity-creation endpoint relative to the API base URL
pub const ACTIVITIES_PATH: &str = "/activities";

/// Grant type for refreshing an access token
pub const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";

/// Scopes requested when none are configured
pub const DEFAULT_STRAVA_SCOPES: &[&str] = &["activity:write", "read"];

/// Athlete ID served when none is configured
pub const DEFAULT_ATHLETE_ID: &str = "1232742";

/// Athlete username served when none is configured
pub const DEFAULT_ATHLETE_USERNAME: &str = "alan_diaz";
