// ABOUTME: Route module organization for workout tracker HTTP endpoints
// ABOUTME: Centralized route definitions by domain plus the shared bearer-auth helper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! Route modules for the workout tracker
//!
//! Each domain module contains route definitions and thin handler functions
//! that delegate to the database layer. Handlers authenticate the caller
//! first; everything after that is keyed by the resulting user id.

/// Authentication routes (register, login)
pub mod auth;
/// Exercise catalog routes (read-only)
pub mod exercises;
/// Fitness goal and exercise goal routes
pub mod goals;
/// Health check routes
pub mod health;
/// Workout plan routes, including nested selected-exercise routes
pub mod plans;
/// User profile routes
pub mod profile;
/// Workout session routes
pub mod sessions;

use crate::auth::AuthResult;
use crate::errors::AppError;
use crate::server::ServerResources;
use axum::Router;
use std::sync::Arc;

/// Resolve the acting user from the request's authorization header
///
/// # Errors
///
/// Returns an auth error if the header is missing or the token is invalid
pub(crate) fn authenticate(
    headers: &http::HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<AuthResult, AppError> {
    let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
    resources.auth_manager.authenticate_header(auth_header)
}

/// Assemble all routes into the application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(health::HealthRoutes::routes())
        .merge(auth::AuthRoutes::routes(resources.clone()))
        .merge(profile::ProfileRoutes::routes(resources.clone()))
        .merge(exercises::ExerciseRoutes::routes(resources.clone()))
        .merge(plans::WorkoutPlanRoutes::routes(resources.clone()))
        .merge(goals::GoalRoutes::routes(resources.clone()))
        .merge(sessions::SessionRoutes::routes(resources))
}
