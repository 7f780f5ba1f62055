// ABOUTME: Server binary for the Easy Strava Upload service
// ABOUTME: Loads configuration, seeds the credential store, and serves the HTTP API until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Easy Strava Upload Server Binary
//!
//! Starts the HTTP API that creates manual Strava activities for the
//! configured athlete.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use easy_strava_upload::{
    config::ServerConfig,
    logging,
    resources::ServerResources,
    routes::build_router,
    store::create_store,
};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "easy-strava-upload")]
#[command(about = "Easy Strava Upload - create manual Strava activities over HTTP")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Easy Strava Upload");
    info!("{}", config.summary());

    let store = create_store(&config.store)
        .await
        .context("Failed to initialize credential store")?;
    info!("Credential store initialized: {}", store.backend_name());

    let resources = Arc::new(ServerResources::new(&config, store));
    let seeded = resources
        .tokens
        .seed_if_absent(&resources.athlete)
        .await
        .context("Failed to seed credential store")?;
    if seeded {
        info!(athlete = %resources.athlete, "Credential record seeded from STRAVA_REFRESH_TOKEN");
    } else {
        info!(athlete = %resources.athlete, "Using cached credential record");
    }

    let app = build_router(
        &resources,
        &config.cors,
        Duration::from_secs(config.request_timeout_secs),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;
    info!("HTTP server listening on {addr}");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let drain_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    tokio::select! {
        result = server.into_future() => result.context("HTTP server error")?,
        () = async {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            warn!("In-flight requests did not finish within {}s, exiting", drain_timeout.as_secs());
        }
    }

    info!("Easy Strava Upload stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
