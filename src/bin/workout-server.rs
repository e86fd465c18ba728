// ABOUTME: HTTP server binary for the workout tracker API
// ABOUTME: Loads configuration from the environment and serves the axum application
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! # Workout Tracker Server Binary
//!
//! Starts the workout tracker HTTP API with user authentication and
//! SQLite-backed storage.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use workout_tracker::{
    auth::AuthManager,
    config::ServerConfig,
    database::Database,
    logging,
    server::{run_http_server, ServerResources},
};

#[derive(Parser)]
#[command(name = "workout-server")]
#[command(about = "Workout tracker API server")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    logging::init_from_env()?;

    info!("Starting workout tracker API");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized");

    let auth_manager = AuthManager::new(config.jwt_secret.as_bytes(), config.jwt_expiry_hours);

    let resources = Arc::new(ServerResources::new(database, auth_manager, config));
    run_http_server(resources).await
}
