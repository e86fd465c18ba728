// ABOUTME: Workout plan route handlers, including nested selected-exercise routes
// ABOUTME: Composite create, list, detail, allow-list update, and cascade delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! Workout plan routes
//!
//! Plan children are only addressable through the plan id plus the owner
//! check; a bare selected-exercise id from another user's plan resolves to
//! the same `NotFound` as a nonexistent one.

use crate::database::plans::{
    CreateWorkoutPlanRequest, SelectedExerciseSpec, UpdateSelectedExerciseRequest,
    UpdateWorkoutPlanRequest,
};
use crate::errors::AppError;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use std::sync::Arc;

/// Workout plan routes
pub struct WorkoutPlanRoutes;

impl WorkoutPlanRoutes {
    /// Create all workout plan routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workout-plans", get(Self::handle_list_plans))
            .route("/api/workout-plans", post(Self::handle_create_plan))
            .route("/api/workout-plans/:id", get(Self::handle_get_plan))
            .route("/api/workout-plans/:id", put(Self::handle_update_plan))
            .route("/api/workout-plans/:id", delete(Self::handle_delete_plan))
            .route(
                "/api/workout-plans/:id/exercises",
                get(Self::handle_list_plan_exercises),
            )
            .route(
                "/api/workout-plans/:id/exercises",
                post(Self::handle_add_plan_exercise),
            )
            .route(
                "/api/workout-plans/:id/exercises/:sid",
                get(Self::handle_get_plan_exercise),
            )
            .route(
                "/api/workout-plans/:id/exercises/:sid",
                put(Self::handle_update_plan_exercise),
            )
            .route(
                "/api/workout-plans/:id/exercises/:sid",
                delete(Self::handle_delete_plan_exercise),
            )
            .with_state(resources)
    }

    async fn handle_list_plans(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let plans = resources.database.list_plans(auth.user_id).await?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "workout_plans": plans })),
        )
            .into_response())
    }

    async fn handle_create_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Json(request): Json<CreateWorkoutPlanRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let plan = resources
            .database
            .create_workout_plan(auth.user_id, &request, resources.config.allow_empty_plans)
            .await?;
        Ok((StatusCode::CREATED, Json(plan)).into_response())
    }

    async fn handle_get_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path(plan_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let plan = resources
            .database
            .get_plan_detail(plan_id, auth.user_id)
            .await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    async fn handle_update_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path(plan_id): Path<i64>,
        Json(request): Json<UpdateWorkoutPlanRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let plan = resources
            .database
            .update_plan(plan_id, auth.user_id, &request)
            .await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    async fn handle_delete_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path(plan_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        resources.database.delete_plan(plan_id, auth.user_id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    async fn handle_list_plan_exercises(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path(plan_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let exercises = resources
            .database
            .list_plan_exercises(plan_id, auth.user_id)
            .await?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "exercises": exercises })),
        )
            .into_response())
    }

    async fn handle_add_plan_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path(plan_id): Path<i64>,
        Json(spec): Json<SelectedExerciseSpec>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let exercise = resources
            .database
            .add_plan_exercise(plan_id, auth.user_id, &spec)
            .await?;
        Ok((StatusCode::CREATED, Json(exercise)).into_response())
    }

    async fn handle_get_plan_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path((plan_id, selected_id)): Path<(i64, i64)>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let exercise = resources
            .database
            .get_plan_exercise(plan_id, auth.user_id, selected_id)
            .await?;
        Ok((StatusCode::OK, Json(exercise)).into_response())
    }

    async fn handle_update_plan_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path((plan_id, selected_id)): Path<(i64, i64)>,
        Json(request): Json<UpdateSelectedExerciseRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let exercise = resources
            .database
            .update_plan_exercise(plan_id, auth.user_id, selected_id, &request)
            .await?;
        Ok((StatusCode::OK, Json(exercise)).into_response())
    }

    async fn handle_delete_plan_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path((plan_id, selected_id)): Path<(i64, i64)>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        resources
            .database
            .delete_plan_exercise(plan_id, auth.user_id, selected_id)
            .await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
