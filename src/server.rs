// ABOUTME: HTTP server bootstrap and shared resource container
// ABOUTME: Assembles the axum router with CORS and tracing layers and serves it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! # Server Resources and HTTP Bootstrap
//!
//! Centralized resource container for dependency injection: database, auth
//! manager, and configuration are created once and shared via `Arc` instead
//! of being rebuilt per request.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::routes;
use anyhow::Result;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared server resources
pub struct ServerResources {
    pub database: Arc<Database>,
    pub auth_manager: Arc<AuthManager>,
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create the resource container with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: ServerConfig) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config: Arc::new(config),
        }
    }
}

/// Build the complete application router
#[must_use]
pub fn app_router(resources: Arc<ServerResources>) -> axum::Router {
    // The API is consumed from browsers on other origins; auth is bearer
    // token, not cookies, so a permissive CORS policy is acceptable.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::router(resources)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until shutdown
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run_http_server(resources: Arc<ServerResources>) -> Result<()> {
    let port = resources.config.http_port;
    let app = app_router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("HTTP server listening on http://0.0.0.0:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}
