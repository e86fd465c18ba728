// ABOUTME: User profile route handlers
// ABOUTME: Read and allow-list update of the caller's body metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

use crate::database::users::UpdateProfileRequest;
use crate::errors::AppError;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;

/// Profile routes
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profile", get(Self::handle_get_profile))
            .route("/api/profile", put(Self::handle_update_profile))
            .with_state(resources)
    }

    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let profile = resources.database.get_profile(auth.user_id).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Json(request): Json<UpdateProfileRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let profile = resources
            .database
            .update_profile(auth.user_id, &request)
            .await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
