// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: REST endpoints issuing JWT tokens for account access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! Authentication routes for user management
//!
//! Handlers are thin wrappers that delegate to [`AuthService`], which holds
//! the registration and login business logic.

use crate::auth;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 8;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// User info for login response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub username: String,
}

/// User login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub jwt_token: String,
    pub expires_at: String,
    pub user: UserInfo,
}

/// Authentication service for business logic
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle user registration
    ///
    /// # Errors
    ///
    /// Returns a validation error for a missing or malformed username or
    /// password, and a conflict error if the username is taken
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let username = request
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::missing_field("username"))?;
        let password = request
            .password
            .as_deref()
            .ok_or_else(|| AppError::missing_field("password"))?;

        if username.len() > MAX_USERNAME_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Username must be at most {MAX_USERNAME_LENGTH} characters"
            )));
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        tracing::info!("User registration attempt for username: {username}");

        // Fail fast on an obvious duplicate; the unique constraint still
        // backstops a race at commit time.
        if self
            .resources
            .database
            .get_user_by_username(username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username already taken"));
        }

        let password_hash = auth::hash_password(password)?;
        let user = User::new(username.to_owned(), password_hash);
        let user_id = self.resources.database.register_user(&user).await?;

        tracing::info!("User registered successfully: {username} ({user_id})");

        Ok(RegisterResponse {
            user_id: user_id.to_string(),
            message: "User registered successfully".into(),
        })
    }

    /// Handle user login
    ///
    /// # Errors
    ///
    /// Returns an auth error when the username or password is wrong; the two
    /// cases are deliberately indistinguishable
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let username = request
            .username
            .as_deref()
            .ok_or_else(|| AppError::missing_field("username"))?;
        let password = request
            .password
            .as_deref()
            .ok_or_else(|| AppError::missing_field("password"))?;

        tracing::info!("User login attempt for username: {username}");

        let user = self
            .resources
            .database
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Invalid username or password"))?;

        let is_valid =
            auth::verify_password(password.to_owned(), user.password_hash.clone()).await?;
        if !is_valid {
            tracing::warn!("Invalid password for user: {username}");
            return Err(AppError::auth_invalid("Invalid username or password"));
        }

        self.resources.database.update_last_active(user.id).await?;

        let jwt_token = self.resources.auth_manager.generate_token(&user)?;
        let expires_at = chrono::Utc::now()
            + chrono::Duration::hours(self.resources.auth_manager.token_expiry_hours());

        tracing::info!("User logged in successfully: {username} ({})", user.id);

        Ok(LoginResponse {
            jwt_token,
            expires_at: expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                username: user.username,
            },
        })
    }
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).register(request).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).login(request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
