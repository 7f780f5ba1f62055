// ABOUTME: Credential record cache backed by the key-value credential store
// ABOUTME: Reads are soft (absent, unreadable, or corrupt all mean "no record"); writes replace the record whole
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use strava_upload_core::errors::StoreError;
use strava_upload_core::models::{AthleteIdentity, CredentialRecord};
use tracing::{debug, warn};

use crate::store::CredentialStore;

/// JSON view of an athlete's credential record in the store
#[derive(Clone)]
pub struct TokenCache {
    store: Arc<dyn CredentialStore>,
}

impl TokenCache {
    /// Create a cache over the given store
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Current credential record for `identity`
    ///
    /// Backend failures and undecodable values are logged and reported as
    /// `None`, which the expiry policy treats as expired.
    pub async fn get(&self, identity: &AthleteIdentity) -> Option<CredentialRecord> {
        match self.load(identity).await {
            Ok(record) => record,
            Err(e) => {
                warn!(athlete_id = %identity.id, error = %e, "Credential store read failed, treating record as absent");
                None
            }
        }
    }

    /// Current credential record, surfacing backend failures
    ///
    /// A stored value that does not decode is still reported as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store backend cannot be read
    pub async fn load(
        &self,
        identity: &AthleteIdentity,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let key = identity.store_key();
        let Some(bytes) = self.store.get(&key).await? else {
            debug!(athlete_id = %identity.id, key = %key, "No credential record stored");
            return Ok(None);
        };

        match serde_json::from_slice::<CredentialRecord>(&bytes) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(athlete_id = %identity.id, key = %key, error = %e, "Stored credential record is corrupt, ignoring it");
                Ok(None)
            }
        }
    }

    /// Replace the credential record for `identity`
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or the store write fails
    pub async fn put(
        &self,
        identity: &AthleteIdentity,
        record: &CredentialRecord,
    ) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(&identity.store_key(), &bytes).await?;
        debug!(athlete_id = %identity.id, expires_at = record.expires_at, "Credential record stored");
        Ok(())
    }
}
