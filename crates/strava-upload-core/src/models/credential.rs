// ABOUTME: Persisted OAuth credential record and athlete identity types
// ABOUTME: JSON layout matches the record stored in the key-value credential store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::store::CREDENTIAL_KEY_PREFIX;

/// Athlete account a credential record belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AthleteIdentity {
    /// Provider-side athlete ID
    pub id: String,
    /// Provider-side username
    pub username: String,
}

impl AthleteIdentity {
    /// Create a new identity
    #[must_use]
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }

    /// Key under which this identity's credential record is stored
    #[must_use]
    pub fn store_key(&self) -> String {
        format!("{CREDENTIAL_KEY_PREFIX}{}", self.id)
    }
}

impl fmt::Display for AthleteIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.username)
    }
}

/// OAuth state persisted per athlete
///
/// A record is only ever written whole; a new record for the same identity
/// replaces the previous one. `expires_at` always comes from the provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Athlete ID
    pub id: String,
    /// Athlete username
    pub username: String,
    /// Rotating refresh token; single use per refresh
    pub refresh_token: String,
    /// Short-lived bearer token, empty when none has been issued yet
    pub access_token: String,
    /// Unix timestamp (seconds) after which `access_token` must not be used
    pub expires_at: i64,
    /// Validity in seconds at issuance
    pub expires_in: i64,
    /// Granted scopes in provider order
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl CredentialRecord {
    /// Seed record holding only a refresh token
    ///
    /// The empty access token and zero expiry force a refresh on first use.
    #[must_use]
    pub fn seed(
        identity: &AthleteIdentity,
        refresh_token: impl Into<String>,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            id: identity.id.clone(),
            username: identity.username.clone(),
            refresh_token: refresh_token.into(),
            access_token: String::new(),
            expires_at: 0,
            expires_in: 0,
            scopes,
        }
    }

    /// Whether an access token has ever been issued into this record
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        !self.access_token.is_empty()
    }
}

// Tokens stay out of logs
impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("refresh_token", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("expires_in", &self.expires_in)
            .field("scopes", &self.scopes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_field_names() {
        let identity = AthleteIdentity::new("1232742", "alan_diaz");
        let record = CredentialRecord {
            access_token: "A1".to_owned(),
            expires_at: 1_700_000_000,
            expires_in: 21_600,
            ..CredentialRecord::seed(&identity, "R1", vec!["activity:write".to_owned()])
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "1232742");
        assert_eq!(value["username"], "alan_diaz");
        assert_eq!(value["refresh_token"], "R1");
        assert_eq!(value["access_token"], "A1");
        assert_eq!(value["expires_at"], 1_700_000_000);
        assert_eq!(value["expires_in"], 21_600);
        assert_eq!(value["scopes"][0], "activity:write");
    }

    #[test]
    fn test_record_without_scopes_parses() {
        let json = r#"{"id":"1","username":"u","refresh_token":"r","access_token":"","expires_at":0,"expires_in":0}"#;
        let record: CredentialRecord = serde_json::from_str(json).unwrap();
        assert!(record.scopes.is_empty());
        assert!(!record.has_access_token());
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let identity = AthleteIdentity::new("1", "u");
        let record = CredentialRecord::seed(&identity, "super-secret-refresh", vec![]);
        let rendered = format!("{record:?}");
        assert!(!rendered.contains("super-secret-refresh"));
    }

    #[test]
    fn test_store_key_is_namespaced() {
        let identity = AthleteIdentity::new("42", "someone");
        assert_eq!(identity.store_key(), "easy_strava:credentials:42");
    }
}
