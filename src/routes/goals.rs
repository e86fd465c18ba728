// ABOUTME: Fitness goal route handlers with nested exercise sub-goals
// ABOUTME: One goal per user - composite create, read, allow-list update, aggregate delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

use crate::database::goals::{CreateFitnessGoalRequest, UpdateFitnessGoalRequest};
use crate::errors::AppError;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use std::sync::Arc;

/// Fitness goal and exercise goal routes
pub struct GoalRoutes;

impl GoalRoutes {
    /// Create all goal routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/fitness-goal", get(Self::handle_get_goal))
            .route("/api/fitness-goal", post(Self::handle_create_goal))
            .route("/api/fitness-goal", put(Self::handle_update_goal))
            .route("/api/fitness-goal", delete(Self::handle_delete_goal))
            .route("/api/exercise-goals", get(Self::handle_list_exercise_goals))
            .with_state(resources)
    }

    async fn handle_get_goal(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let goal = resources.database.get_fitness_goal(auth.user_id).await?;
        Ok((StatusCode::OK, Json(goal)).into_response())
    }

    async fn handle_create_goal(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Json(request): Json<CreateFitnessGoalRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let goal = resources
            .database
            .create_fitness_goal(auth.user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(goal)).into_response())
    }

    async fn handle_update_goal(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Json(request): Json<UpdateFitnessGoalRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let goal = resources
            .database
            .update_fitness_goal(auth.user_id, &request)
            .await?;
        Ok((StatusCode::OK, Json(goal)).into_response())
    }

    async fn handle_delete_goal(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        resources.database.delete_fitness_goal(auth.user_id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    async fn handle_list_exercise_goals(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let goals = resources.database.list_exercise_goals(auth.user_id).await?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "exercise_goals": goals })),
        )
            .into_response())
    }
}
