// ABOUTME: Server binary for the Ringside analytics API
// ABOUTME: Loads configuration and optional seed data, then serves the HTTP routes until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ringside Server Binary
//!
//! Starts the HTTP API backed by the in-memory provider, optionally seeded
//! from a JSON fixture.

use anyhow::{Context, Result};
use clap::Parser;
use ringside_server::{
    config::environment::ServerConfig,
    database_plugins::{DatabaseProvider, InMemoryDatabase, SeedData},
    logging,
    resources::ServerResources,
    routes,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ringside-server")]
#[command(about = "Ringside - athlete performance analytics API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// JSON fixture with users, athletes, events and sessions
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;
    info!("{}", config.summary());

    let column_mapping = config.uploads.column_mapping()?;
    let database: Arc<dyn DatabaseProvider> = match &args.seed {
        Some(path) => Arc::new(InMemoryDatabase::from_seed(SeedData::from_file(path)?)),
        None => {
            warn!("No seed file given, starting with an empty store");
            Arc::new(InMemoryDatabase::new())
        }
    };

    let address = format!("{}:{}", config.host, config.http_port);
    let resources = Arc::new(ServerResources::new(database, config, column_mapping));
    let app = routes::router(resources);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Ringside API listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}
