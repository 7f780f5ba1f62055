// ABOUTME: Refresh-token exchange against the Strava OAuth token endpoint
// ABOUTME: Turns a token response into a fresh credential record; the old refresh token is spent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use strava_upload_core::constants::oauth::GRANT_TYPE_REFRESH_TOKEN;
use strava_upload_core::errors::RefreshError;
use strava_upload_core::models::{AthleteIdentity, CredentialRecord};
use tracing::{debug, warn};

use crate::config::StravaConfig;

/// Longest provider error body kept in a `ProviderRejected` error
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Strava token response body
#[derive(Debug, Deserialize)]
struct StravaTokenResponse {
    #[serde(default)]
    token_type: String,
    access_token: String,
    expires_at: i64,
    #[serde(default)]
    expires_in: Option<i64>,
    refresh_token: String,
}

/// Exchanges refresh tokens for new credential sets
///
/// Performs exactly one POST per call and never touches the credential store.
#[derive(Clone)]
pub struct TokenRefresher {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scopes: Vec<String>,
}

impl TokenRefresher {
    /// Create a refresher for the configured Strava application
    #[must_use]
    pub fn new(client: Client, config: &StravaConfig) -> Self {
        Self {
            client,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scopes: config.scopes.clone(),
        }
    }

    /// Exchange `refresh_token` for a new credential record for `identity`
    ///
    /// The returned record carries the provider's (possibly rotated) refresh
    /// token and `expires_at`. Scopes come from configuration since the
    /// refresh response does not echo them.
    ///
    /// # Errors
    ///
    /// Returns `Network` if the endpoint cannot be reached, `ProviderRejected`
    /// on a non-2xx answer, and `Malformed` if a 2xx body is not a token response
    pub async fn refresh(
        &self,
        identity: &AthleteIdentity,
        refresh_token: &str,
    ) -> Result<CredentialRecord, RefreshError> {
        let params = [
            ("grant_type", GRANT_TYPE_REFRESH_TOKEN),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
        ];

        debug!(athlete_id = %identity.id, token_url = %self.token_url, "Refreshing Strava access token");

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(
                athlete_id = %identity.id,
                status = status.as_u16(),
                "Strava token endpoint rejected refresh"
            );
            return Err(RefreshError::ProviderRejected {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let token: StravaTokenResponse =
            serde_json::from_str(&body).map_err(|e| RefreshError::Malformed {
                status: status.as_u16(),
                reason: e.to_string(),
            })?;

        if token.access_token.is_empty() || token.refresh_token.is_empty() {
            return Err(RefreshError::Malformed {
                status: status.as_u16(),
                reason: "token response carried an empty token".to_owned(),
            });
        }

        let expires_in = token
            .expires_in
            .unwrap_or_else(|| token.expires_at.saturating_sub(Utc::now().timestamp()).max(0));

        debug!(
            athlete_id = %identity.id,
            token_type = %token.token_type,
            expires_at = token.expires_at,
            "Strava access token refreshed"
        );

        Ok(CredentialRecord {
            id: identity.id.clone(),
            username: identity.username.clone(),
            refresh_token: token.refresh_token,
            access_token: token.access_token,
            expires_at: token.expires_at,
            expires_in,
            scopes: self.scopes.clone(),
        })
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
