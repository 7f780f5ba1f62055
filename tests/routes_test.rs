// ABOUTME: HTTP-level tests for the upload service router
// ABOUTME: Exercises plaintext routes, activity upload status mapping, health, and request IDs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use easy_strava_upload::{
    activities::ActivityDispatcher,
    config::CorsConfig,
    oauth2_client::{ExpiryPolicy, TokenCache, TokenManager, TokenRefresher},
    resources::ServerResources,
    routes::build_router,
    store::{CredentialStore, InMemoryStore},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use common::{
    athlete, now, record, server_resources, ACTIVITIES_PATH, SEED_REFRESH_TOKEN, TOKEN_PATH,
};

fn router(server: &MockServer, store: Arc<dyn CredentialStore>) -> Router {
    build_router(
        &server_resources(server, store),
        &CorsConfig::default(),
        Duration::from_secs(30),
    )
}

async fn valid_store() -> Arc<dyn CredentialStore> {
    let store: Arc<dyn CredentialStore> = Arc::new(InMemoryStore::new());
    TokenCache::new(Arc::clone(&store))
        .put(&athlete(), &record("A-cached", "R1", now() + 3600))
        .await
        .unwrap();
    store
}

fn upload_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/activities")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("name=Lunch+Run&type=Run&elapsed_time=1800"))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_plaintext_routes() -> Result<()> {
    let server = MockServer::start().await;
    let app = router(&server, Arc::new(InMemoryStore::new()));

    for (uri, expected) in [
        ("/", "Easy Strava Upload is running"),
        ("/activities", "Get Request Successful"),
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, expected);
    }

    let about = app
        .oneshot(Request::builder().uri("/about").body(Body::empty())?)
        .await?;
    assert_eq!(about.status(), StatusCode::OK);
    assert!(body_text(about).await.contains("Strava"));
    Ok(())
}

#[tokio::test]
async fn test_upload_success_returns_created() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ACTIVITIES_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1, "name": "Lunch Run"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = router(&server, valid_store().await)
        .oneshot(upload_request())
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_text(response).await, "Activity created");
    Ok(())
}

#[tokio::test]
async fn test_upload_provider_rejection_is_bad_gateway() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ACTIVITIES_PATH))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let response = router(&server, valid_store().await)
        .oneshot(upload_request())
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_str(&body_text(response).await)?;
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().contains("422"));
    Ok(())
}

#[tokio::test]
async fn test_upload_auth_failure_is_bad_gateway() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let response = router(&server, Arc::new(InMemoryStore::new()))
        .oneshot(upload_request())
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_str(&body_text(response).await)?;
    assert_eq!(body["error"]["code"], "EXTERNAL_AUTH_FAILED");
    Ok(())
}

#[tokio::test]
async fn test_upload_unreachable_provider_is_unavailable() -> Result<()> {
    let server = MockServer::start().await;
    let base = common::unreachable_base_url().await;
    let resources = server_resources(&server, valid_store().await);
    let config = common::strava_config(&base);
    let resources = Arc::new(ServerResources {
        dispatcher: Arc::new(ActivityDispatcher::new(
            Arc::clone(&resources.tokens),
            reqwest::Client::new(),
            config.activities_url(),
        )),
        ..(*resources).clone()
    });

    let response = build_router(&resources, &CorsConfig::default(), Duration::from_secs(30))
        .oneshot(upload_request())
        .await?;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = serde_json::from_str(&body_text(response).await)?;
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_UNAVAILABLE");
    Ok(())
}

#[tokio::test]
async fn test_upload_unreachable_token_endpoint_is_bad_gateway() -> Result<()> {
    let config = common::strava_config(&common::unreachable_base_url().await);
    let store: Arc<dyn CredentialStore> = Arc::new(InMemoryStore::new());
    let tokens = Arc::new(TokenManager::new(
        TokenCache::new(Arc::clone(&store)),
        TokenRefresher::new(reqwest::Client::new(), &config),
        ExpiryPolicy::strict(),
        SEED_REFRESH_TOKEN,
        config.scopes.clone(),
    ));
    let resources = Arc::new(ServerResources {
        athlete: athlete(),
        dispatcher: Arc::new(ActivityDispatcher::new(
            Arc::clone(&tokens),
            reqwest::Client::new(),
            config.activities_url(),
        )),
        tokens,
        store: Arc::clone(&store),
    });

    let response = build_router(&resources, &CorsConfig::default(), Duration::from_secs(30))
        .oneshot(upload_request())
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_str(&body_text(response).await)?;
    assert_eq!(body["error"]["code"], "EXTERNAL_AUTH_FAILED");
    assert!(store.get(&athlete().store_key()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_unsupported_method_on_activities() -> Result<()> {
    let server = MockServer::start().await;
    let response = router(&server, Arc::new(InMemoryStore::new()))
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/activities")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}

#[tokio::test]
async fn test_health_and_ready() -> Result<()> {
    let server = MockServer::start().await;
    let app = router(&server, Arc::new(InMemoryStore::new()));

    let health = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(health.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(health).await)?;
    assert_eq!(body["status"], "healthy");

    let ready = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty())?)
        .await?;
    assert_eq!(ready.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(ready).await)?;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["store"], "memory");
    Ok(())
}

#[tokio::test]
async fn test_ready_reports_store_outage() -> Result<()> {
    let server = MockServer::start().await;
    let response = router(&server, Arc::new(common::FailingStore))
        .oneshot(Request::builder().uri("/ready").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn test_request_id_generated_and_propagated() -> Result<()> {
    let server = MockServer::start().await;
    let app = router(&server, Arc::new(InMemoryStore::new()));

    let generated = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    let id = generated.headers().get("x-request-id").unwrap().to_str()?;
    assert!(id.starts_with("req_"));

    let supplied = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "client-123")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(supplied.headers().get("x-request-id").unwrap(), "client-123");
    Ok(())
}
