// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses database URL, HTTP port, JWT secret, and aggregate policy flags from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! Environment-based configuration management

use anyhow::{Context, Result};
use std::env;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite database URL
    pub database_url: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Secret used to sign and verify JWT tokens
    pub jwt_secret: String,
    /// How long issued tokens stay valid
    pub jwt_expiry_hours: i64,
    /// Whether a workout plan may be created with no selected exercises.
    /// The source systems disagreed on this; default is to allow it.
    pub allow_empty_plans: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is unset or a numeric variable fails
    /// to parse
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:workout.db".into());

        let http_port = match env::var("HTTP_PORT") {
            Ok(port) => port.parse().context("HTTP_PORT is not a valid port")?,
            Err(_) => 8080,
        };

        let jwt_secret = env::var("JWT_SECRET")
            .context("JWT_SECRET is not set in the environment")?;

        let jwt_expiry_hours = match env::var("JWT_EXPIRY_HOURS") {
            Ok(hours) => hours
                .parse()
                .context("JWT_EXPIRY_HOURS is not a valid number")?,
            Err(_) => 24,
        };

        let allow_empty_plans = env::var("ALLOW_EMPTY_PLANS")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        Ok(Self {
            database_url,
            http_port,
            jwt_secret,
            jwt_expiry_hours,
            allow_empty_plans,
        })
    }

    /// One-line configuration summary for startup logging (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "database={} port={} token_expiry={}h allow_empty_plans={}",
            self.database_url, self.http_port, self.jwt_expiry_hours, self.allow_empty_plans
        )
    }
}
