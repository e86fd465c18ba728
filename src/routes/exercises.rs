// ABOUTME: Exercise catalog route handlers
// ABOUTME: Read-only catalog listing and by-id lookup for authenticated users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

use crate::errors::AppError;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Exercise catalog routes
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise catalog routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercises", get(Self::handle_list_exercises))
            .route("/api/exercises/:id", get(Self::handle_get_exercise))
            .with_state(resources)
    }

    async fn handle_list_exercises(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;
        let exercises = resources.database.list_exercises().await?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "exercises": exercises })),
        )
            .into_response())
    }

    async fn handle_get_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path(exercise_id): Path<i64>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;
        let exercise = resources
            .database
            .get_exercise_by_id(exercise_id)
            .await?
            .ok_or_else(|| AppError::not_found("Exercise"))?;
        Ok((StatusCode::OK, Json(exercise)).into_response())
    }
}
