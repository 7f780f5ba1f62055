// ABOUTME: Route handlers for manual activity uploads
// ABOUTME: Forwards form-encoded activity fields to Strava for the configured athlete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Activity routes
//!
//! `POST /activities` takes the same form fields Strava's create-activity
//! endpoint accepts and passes them through untouched.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Form, Router,
};
use strava_upload_core::errors::AppError;

use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Body returned for `GET /activities`
pub const GET_ACKNOWLEDGEMENT: &str = "Get Request Successful";

/// Body returned with `201 Created` after a successful upload
pub const CREATED_ACKNOWLEDGEMENT: &str = "Activity created";

/// Activity routes implementation
pub struct ActivityRoutes;

impl ActivityRoutes {
    /// Create activity routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/activities",
                get(Self::handle_get).post(Self::handle_post),
            )
            .with_state(resources)
    }

    async fn handle_get() -> &'static str {
        GET_ACKNOWLEDGEMENT
    }

    async fn handle_post(
        State(resources): State<Arc<ServerResources>>,
        Form(fields): Form<Vec<(String, String)>>,
    ) -> Result<(StatusCode, &'static str), AppError> {
        let started = Instant::now();
        let result = resources
            .dispatcher
            .post_activity(&resources.athlete, &fields)
            .await;

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &result {
            Ok(_) => AppLogger::log_dispatch(&resources.athlete.id, Some(201), true, duration_ms),
            Err(e) => AppLogger::log_dispatch(&resources.athlete.id, e.status(), false, duration_ms),
        }

        result
            .map(|_| (StatusCode::CREATED, CREATED_ACKNOWLEDGEMENT))
            .map_err(AppError::from)
    }
}
