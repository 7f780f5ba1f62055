// ABOUTME: Centralized resource container shared by the HTTP handlers
// ABOUTME: Wires the credential store, token manager, and activity dispatcher from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared behind an `Arc` so every request uses
//! the same token manager, and therefore the same single-flight guards.

use std::sync::Arc;

use strava_upload_core::models::AthleteIdentity;

use crate::activities::ActivityDispatcher;
use crate::config::ServerConfig;
use crate::oauth2_client::{ExpiryPolicy, TokenCache, TokenManager, TokenRefresher};
use crate::store::CredentialStore;
use crate::utils::http_client::{api_client, oauth_client};

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Athlete on whose behalf activities are posted
    pub athlete: AthleteIdentity,
    /// Credential store backend
    pub store: Arc<dyn CredentialStore>,
    /// Token lifecycle coordinator
    pub tokens: Arc<TokenManager>,
    /// Activity dispatcher
    pub dispatcher: Arc<ActivityDispatcher>,
}

impl ServerResources {
    /// Build resources from configuration over an already connected store
    #[must_use]
    pub fn new(config: &ServerConfig, store: Arc<dyn CredentialStore>) -> Self {
        let strava = &config.strava;
        let refresher = TokenRefresher::new(oauth_client(&config.http_client), strava);
        let tokens = Arc::new(TokenManager::new(
            TokenCache::new(Arc::clone(&store)),
            refresher,
            ExpiryPolicy::with_grace(strava.expiry_grace_secs),
            strava.initial_refresh_token.as_str(),
            strava.scopes.clone(),
        ));
        let dispatcher = Arc::new(ActivityDispatcher::new(
            Arc::clone(&tokens),
            api_client(&config.http_client),
            strava.activities_url(),
        ));

        Self {
            athlete: config.athlete.clone(),
            store,
            tokens,
            dispatcher,
        }
    }
}
