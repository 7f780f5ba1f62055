// ABOUTME: Route module organization for the upload service HTTP endpoints
// ABOUTME: Assembles domain routers and wraps them in tracing, timeout, request-id, and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Each domain module contains only route definitions and thin handlers
//! that delegate to [`ServerResources`].

/// Activity upload routes
pub mod activities;
/// Health check and readiness routes
pub mod health;
/// Landing and about routes
pub mod home;

pub use activities::ActivityRoutes;
pub use health::HealthRoutes;
pub use home::HomeRoutes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::HeaderName;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::middleware::{create_request_span, setup_cors, RequestIdGenerator, REQUEST_ID_HEADER};
use crate::resources::ServerResources;

/// Build the complete application router
#[must_use]
pub fn build_router(
    resources: &Arc<ServerResources>,
    cors: &CorsConfig,
    request_timeout: Duration,
) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(HomeRoutes::routes())
        .merge(ActivityRoutes::routes(Arc::clone(resources)))
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    request_id_header.clone(),
                    RequestIdGenerator,
                ))
                .layer(TraceLayer::new_for_http().make_span_with(create_request_span))
                .layer(PropagateRequestIdLayer::new(request_id_header))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(setup_cors(cors))
}
