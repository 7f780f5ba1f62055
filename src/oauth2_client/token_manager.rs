// ABOUTME: Token lifecycle coordinator handing out usable access tokens per athlete
// ABOUTME: Serializes read-evaluate-refresh-persist under a per-athlete single-flight guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use strava_upload_core::constants::oauth::STRAVA;
use strava_upload_core::errors::{DispatchError, StoreError};
use strava_upload_core::models::{AthleteIdentity, CredentialRecord};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::{ExpiryPolicy, TokenCache, TokenRefresher};
use crate::logging::AppLogger;

/// Hands out valid access tokens, refreshing and persisting when needed
///
/// Strava refresh tokens rotate on every use, so two concurrent refreshes
/// with the same token would leave one caller holding a dead token. All
/// token lookups for an athlete run one at a time behind that athlete's
/// guard; lookups for different athletes do not block each other.
pub struct TokenManager {
    cache: TokenCache,
    refresher: TokenRefresher,
    policy: ExpiryPolicy,
    seed_refresh_token: String,
    seed_scopes: Vec<String>,
    flow_guards: DashMap<String, Arc<Mutex<()>>>,
}

impl TokenManager {
    /// Create a manager
    ///
    /// `seed_refresh_token` is used when no usable refresh token is cached.
    #[must_use]
    pub fn new(
        cache: TokenCache,
        refresher: TokenRefresher,
        policy: ExpiryPolicy,
        seed_refresh_token: impl Into<String>,
        seed_scopes: Vec<String>,
    ) -> Self {
        Self {
            cache,
            refresher,
            policy,
            seed_refresh_token: seed_refresh_token.into(),
            seed_scopes,
            flow_guards: DashMap::new(),
        }
    }

    /// Credential cache used by this manager
    #[must_use]
    pub const fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Return an access token for `identity` that is valid right now
    ///
    /// Reads the cached record once. If it is absent, has no access token,
    /// or is past its expiry, exchanges the cached refresh token (or the
    /// configured seed when none is cached) and persists the new record
    /// before returning its access token.
    ///
    /// # Errors
    ///
    /// Returns `AuthFailed` if the refresh exchange fails, in which case the
    /// cached record is left untouched, and `StoreFailure` if the refreshed
    /// record cannot be persisted
    pub async fn valid_access_token(
        &self,
        identity: &AthleteIdentity,
    ) -> Result<String, DispatchError> {
        let guard = self.flow_guard(identity);
        let _singleflight = guard.lock().await;

        let current = self.cache.get(identity).await;
        let now = Utc::now().timestamp();

        if let Some(record) = current
            .as_ref()
            .filter(|record| !self.policy.is_expired(Some(*record), now))
        {
            debug!(athlete_id = %identity.id, expires_at = record.expires_at, "Using cached access token");
            return Ok(record.access_token.clone());
        }

        let refresh_token = current
            .as_ref()
            .map(|record| record.refresh_token.as_str())
            .filter(|token| !token.is_empty())
            .unwrap_or(self.seed_refresh_token.as_str());

        info!(
            athlete_id = %identity.id,
            had_record = current.is_some(),
            "Access token missing or expired, refreshing"
        );

        let record = self
            .refresher
            .refresh(identity, refresh_token)
            .await
            .map_err(|e| {
                warn!(athlete_id = %identity.id, error = %e, "Token refresh failed");
                AppLogger::log_oauth_event(&identity.id, STRAVA, "token_refresh", false);
                DispatchError::AuthFailed(e)
            })?;

        self.cache.put(identity, &record).await.map_err(|e| {
            error!(
                athlete_id = %identity.id,
                error = %e,
                "Refreshed credentials could not be persisted; the rotated refresh token may be lost"
            );
            DispatchError::StoreFailure(e)
        })?;

        AppLogger::log_oauth_event(&identity.id, STRAVA, "token_refresh", true);
        info!(athlete_id = %identity.id, expires_at = record.expires_at, "Access token refreshed and stored");
        Ok(record.access_token)
    }

    /// Write a seed record for `identity` unless one is already stored
    ///
    /// Returns `true` if a seed was written. A cached record always wins over
    /// the configured seed because it may hold a newer, rotated refresh token.
    /// A stored value that fails to decode is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written; nothing is
    /// overwritten when the read fails
    pub async fn seed_if_absent(&self, identity: &AthleteIdentity) -> Result<bool, StoreError> {
        let guard = self.flow_guard(identity);
        let _singleflight = guard.lock().await;

        if self.cache.load(identity).await?.is_some() {
            debug!(athlete_id = %identity.id, "Credential record already stored, keeping it");
            return Ok(false);
        }

        let seed = CredentialRecord::seed(
            identity,
            self.seed_refresh_token.as_str(),
            self.seed_scopes.clone(),
        );
        self.cache.put(identity, &seed).await?;
        info!(athlete_id = %identity.id, "Seeded credential record from configuration");
        Ok(true)
    }

    fn flow_guard(&self, identity: &AthleteIdentity) -> Arc<Mutex<()>> {
        Arc::clone(&self.flow_guards.entry(identity.id.clone()).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StravaConfig;
    use crate::store::InMemoryStore;

    fn manager(store: Arc<InMemoryStore>) -> TokenManager {
        let config = StravaConfig::new("client", "secret", "R-seed");
        TokenManager::new(
            TokenCache::new(store),
            TokenRefresher::new(reqwest::Client::new(), &config),
            ExpiryPolicy::strict(),
            "R-seed",
            vec!["activity:write".to_owned()],
        )
    }

    #[test]
    fn test_flow_guard_shared_per_identity() {
        let manager = manager(Arc::new(InMemoryStore::new()));
        let a = AthleteIdentity::new("1", "one");
        let b = AthleteIdentity::new("2", "two");

        assert!(Arc::ptr_eq(&manager.flow_guard(&a), &manager.flow_guard(&a)));
        assert!(!Arc::ptr_eq(&manager.flow_guard(&a), &manager.flow_guard(&b)));
    }

    #[tokio::test]
    async fn test_seed_if_absent_writes_once() {
        let store = Arc::new(InMemoryStore::new());
        let manager = manager(Arc::clone(&store));
        let identity = AthleteIdentity::new("1232742", "alan_diaz");

        assert!(manager.seed_if_absent(&identity).await.unwrap());
        assert!(!manager.seed_if_absent(&identity).await.unwrap());

        let record = manager.cache().get(&identity).await.unwrap();
        assert_eq!(record.refresh_token, "R-seed");
        assert!(!record.has_access_token());
        assert_eq!(record.scopes, vec!["activity:write".to_owned()]);
    }

    #[tokio::test]
    async fn test_seed_does_not_override_cached_record() {
        let store = Arc::new(InMemoryStore::new());
        let manager = manager(Arc::clone(&store));
        let identity = AthleteIdentity::new("1232742", "alan_diaz");
        let rotated = CredentialRecord {
            access_token: "A1".to_owned(),
            expires_at: Utc::now().timestamp() + 3600,
            ..CredentialRecord::seed(&identity, "R-rotated", vec![])
        };
        manager.cache().put(&identity, &rotated).await.unwrap();

        assert!(!manager.seed_if_absent(&identity).await.unwrap());
        assert_eq!(manager.cache().get(&identity).await, Some(rotated));
    }

    #[tokio::test]
    async fn test_valid_cached_token_returned_without_refresh() {
        let store = Arc::new(InMemoryStore::new());
        let manager = manager(Arc::clone(&store));
        let identity = AthleteIdentity::new("1232742", "alan_diaz");
        let record = CredentialRecord {
            access_token: "A-cached".to_owned(),
            expires_at: Utc::now().timestamp() + 3600,
            ..CredentialRecord::seed(&identity, "R1", vec![])
        };
        manager.cache().put(&identity, &record).await.unwrap();

        let token = manager.valid_access_token(&identity).await.unwrap();
        assert_eq!(token, "A-cached");
    }
}
