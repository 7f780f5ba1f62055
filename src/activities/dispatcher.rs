// ABOUTME: Forwards manual activity forms to the Strava activity endpoint with a bearer token
// ABOUTME: Success is exactly HTTP 201; everything else is reported as a typed dispatch error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use strava_upload_core::errors::DispatchError;
use strava_upload_core::models::AthleteIdentity;
use tracing::{info, warn};

use crate::oauth2_client::TokenManager;

/// Subset of the provider's created-activity body worth echoing in logs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedActivity {
    /// Provider-assigned activity ID
    #[serde(default)]
    pub id: Option<u64>,
    /// Activity name as stored by the provider
    #[serde(default)]
    pub name: Option<String>,
}

/// Posts activities for an athlete using a valid access token
pub struct ActivityDispatcher {
    tokens: Arc<TokenManager>,
    client: Client,
    activities_url: String,
}

impl ActivityDispatcher {
    /// Create a dispatcher posting to `activities_url`
    #[must_use]
    pub fn new(
        tokens: Arc<TokenManager>,
        client: Client,
        activities_url: impl Into<String>,
    ) -> Self {
        Self {
            tokens,
            client,
            activities_url: activities_url.into(),
        }
    }

    /// Token manager used to authorize requests
    #[must_use]
    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Create one activity from `form`
    ///
    /// Fields are sent as `application/x-www-form-urlencoded` in the given
    /// order and are not validated here; the provider decides what it
    /// accepts. A refresh, if one is needed, is persisted before the
    /// activity request goes out.
    ///
    /// # Errors
    ///
    /// Returns `AuthFailed` or `StoreFailure` if no valid token could be
    /// obtained (no activity request is made), `Network` if the endpoint is
    /// unreachable, and `ProviderRejected` for any status other than 201
    pub async fn post_activity(
        &self,
        identity: &AthleteIdentity,
        form: &[(String, String)],
    ) -> Result<CreatedActivity, DispatchError> {
        let access_token = self.tokens.valid_access_token(identity).await?;

        let response = self
            .client
            .post(&self.activities_url)
            .bearer_auth(&access_token)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            warn!(
                athlete_id = %identity.id,
                status = status.as_u16(),
                body = %body,
                "Strava rejected activity"
            );
            return Err(DispatchError::ProviderRejected {
                status: status.as_u16(),
            });
        }

        // The activity exists once 201 is returned; an unreadable body does not undo that
        let created = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(e) => {
                warn!(athlete_id = %identity.id, error = %e, "Could not read created activity body");
                CreatedActivity::default()
            }
        };

        info!(
            athlete_id = %identity.id,
            activity_id = ?created.id,
            activity_name = ?created.name,
            "Activity created"
        );
        Ok(created)
    }
}
