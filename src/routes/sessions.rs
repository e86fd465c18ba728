// ABOUTME: Workout session route handlers
// ABOUTME: Logging and reading training sessions against owned plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

use crate::database::sessions::CreateWorkoutSessionRequest;
use crate::errors::AppError;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Workout session routes
pub struct SessionRoutes;

impl SessionRoutes {
    /// Create all workout session routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workout-sessions", get(Self::handle_list_sessions))
            .route("/api/workout-sessions", post(Self::handle_create_session))
            .route("/api/workout-sessions/:id", get(Self::handle_get_session))
            .with_state(resources)
    }

    async fn handle_list_sessions(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let sessions = resources.database.list_sessions(auth.user_id).await?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "workout_sessions": sessions })),
        )
            .into_response())
    }

    async fn handle_create_session(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Json(request): Json<CreateWorkoutSessionRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let session = resources
            .database
            .create_session(auth.user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(session)).into_response())
    }

    async fn handle_get_session(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path(session_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let session = resources
            .database
            .get_session(session_id, auth.user_id)
            .await?;
        Ok((StatusCode::OK, Json(session)).into_response())
    }
}
