// ABOUTME: Expiry policy deciding whether a cached access token must be refreshed
// ABOUTME: Strict comparison against the provider-issued expires_at with an optional grace window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use strava_upload_core::models::CredentialRecord;

/// Decides whether an access token is still usable at a given instant
///
/// A token is expired when there is no record, the record holds no access
/// token, or `expires_at < now + grace`. With the default zero grace a token
/// whose `expires_at` equals `now` is still valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiryPolicy {
    grace_secs: i64,
}

impl ExpiryPolicy {
    /// Policy treating tokens as expired `grace_secs` before `expires_at`
    ///
    /// Negative values are clamped to zero.
    #[must_use]
    pub const fn with_grace(grace_secs: i64) -> Self {
        Self {
            grace_secs: if grace_secs > 0 { grace_secs } else { 0 },
        }
    }

    /// Policy with no grace window
    #[must_use]
    pub const fn strict() -> Self {
        Self { grace_secs: 0 }
    }

    /// Grace window in seconds
    #[must_use]
    pub const fn grace_secs(&self) -> i64 {
        self.grace_secs
    }

    /// Whether `record` must be refreshed before use at Unix time `now`
    #[must_use]
    pub fn is_expired(&self, record: Option<&CredentialRecord>, now: i64) -> bool {
        record.is_none_or(|record| {
            !record.has_access_token() || record.expires_at < now.saturating_add(self.grace_secs)
        })
    }
}
