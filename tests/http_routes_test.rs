// ABOUTME: End-to-end HTTP tests exercising the axum router without a network listener
// ABOUTME: Covers registration, login, authenticated CRUD, and wire-level error responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use workout_tracker::auth::AuthManager;
use workout_tracker::config::ServerConfig;
use workout_tracker::database::exercises::NewExercise;
use workout_tracker::database::Database;
use workout_tracker::server::{app_router, ServerResources};

/// Build the application router over a fresh in-memory database with a
/// seeded exercise catalog
async fn create_test_app() -> Result<Router> {
    let database = Database::new("sqlite::memory:").await?;
    for (name, difficulty) in [("Squat", 2), ("Bench Press", 2), ("Deadlift", 3)] {
        database
            .insert_exercise(&NewExercise {
                name: name.to_owned(),
                description: None,
                instructions: None,
                target_muscles: None,
                difficulty,
            })
            .await?;
    }

    let config = ServerConfig {
        database_url: "sqlite::memory:".to_owned(),
        http_port: 0,
        jwt_secret: "test-secret-key-for-http-tests".to_owned(),
        jwt_expiry_hours: 24,
        allow_empty_plans: true,
    };
    let auth_manager = AuthManager::new(config.jwt_secret.as_bytes(), config.jwt_expiry_hours);

    Ok(app_router(Arc::new(ServerResources::new(
        database,
        auth_manager,
        config,
    ))))
}

/// Send one request and decode the JSON response body (null for empty bodies)
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

/// Register a user and log in, returning the bearer token
async fn register_and_login(app: &Router, username: &str) -> Result<String> {
    let credentials = json!({ "username": username, "password": "longenough1" });
    let (status, _) = send(app, "POST", "/api/auth/register", None, Some(credentials.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, "POST", "/api/auth/login", None, Some(credentials)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body["jwt_token"].as_str().expect("login returns a token").to_owned())
}

#[tokio::test]
async fn test_health_endpoints() -> Result<()> {
    let app = create_test_app().await?;

    let (status, body) = send(&app, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = send(&app, "GET", "/ready", None, None).await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_register_login_and_plan_lifecycle() -> Result<()> {
    let app = create_test_app().await?;
    let token = register_and_login(&app, "alice").await?;

    // The catalog is readable; grab Squat's id.
    let (status, body) = send(&app, "GET", "/api/exercises", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    let squat = body["exercises"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == "Squat")
        .expect("catalog contains Squat")
        .clone();

    // Create a plan with one selected exercise and a weight target.
    let (status, plan) = send(
        &app,
        "POST",
        "/api/workout-plans",
        Some(&token),
        Some(json!({
            "name": "Leg Day",
            "frequency": "2x/week",
            "session_duration": 60,
            "target_weight": 100.0,
            "selected_exercises": [
                { "exercise_id": squat["id"], "sets": 3, "reps": 10 }
            ]
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(plan["name"], "Leg Day");
    assert_eq!(plan["selected_exercises"][0]["exercise"]["name"], "Squat");
    assert_eq!(plan["selected_exercises"][0]["sets"], 3);

    let plan_id = plan["id"].as_i64().unwrap();

    // The detail endpoint returns the same aggregate.
    let uri = format!("/api/workout-plans/{plan_id}");
    let (status, detail) = send(&app, "GET", &uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["target_weight"], 100.0);

    // Delete, then the plan is gone.
    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    Ok(())
}

#[tokio::test]
async fn test_requests_without_token_are_unauthorized() -> Result<()> {
    let app = create_test_app().await?;

    for uri in ["/api/workout-plans", "/api/fitness-goal", "/api/profile"] {
        let (status, body) = send(&app, "GET", uri, None, None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "GET {uri}");
        assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
    }

    // A malformed token is rejected the same way.
    let (status, body) = send(&app, "GET", "/api/workout-plans", Some("not-a-jwt"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_INVALID");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_registration_returns_conflict() -> Result<()> {
    let app = create_test_app().await?;
    let credentials = json!({ "username": "alice", "password": "longenough1" });

    let (status, _) = send(&app, "POST", "/api/auth/register", None, Some(credentials.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/auth/register", None, Some(credentials)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    Ok(())
}

#[tokio::test]
async fn test_login_failures_are_uniform() -> Result<()> {
    let app = create_test_app().await?;
    register_and_login(&app, "alice").await?;

    let (status, wrong_password) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong-password" })),
    )
    .await?;
    let (status2, unknown_user) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "mallory", "password": "wrong-password" })),
    )
    .await?;

    // Wrong password and unknown username are indistinguishable on the wire.
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(status2, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_user);

    Ok(())
}

#[tokio::test]
async fn test_invalid_plan_payload_returns_validation_error() -> Result<()> {
    let app = create_test_app().await?;
    let token = register_and_login(&app, "alice").await?;

    // Missing name.
    let (status, body) = send(
        &app,
        "POST",
        "/api/workout-plans",
        Some(&token),
        Some(json!({ "frequency": "daily" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");

    // Unknown catalog reference.
    let (status, body) = send(
        &app,
        "POST",
        "/api/workout-plans",
        Some(&token),
        Some(json!({
            "name": "Bad Plan",
            "selected_exercises": [{ "exercise_id": 9999 }]
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    Ok(())
}

#[tokio::test]
async fn test_users_cannot_reach_each_others_plans() -> Result<()> {
    let app = create_test_app().await?;
    let alice = register_and_login(&app, "alice").await?;
    let bob = register_and_login(&app, "bob").await?;

    let (status, plan) = send(
        &app,
        "POST",
        "/api/workout-plans",
        Some(&alice),
        Some(json!({ "name": "Leg Day" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/workout-plans/{}", plan["id"]);

    // For Bob the plan does not exist, exactly like a nonexistent id.
    let (status, foreign) = send(&app, "GET", &uri, Some(&bob), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status2, absent) = send(&app, "GET", "/api/workout-plans/9999", Some(&bob), None).await?;
    assert_eq!(status2, StatusCode::NOT_FOUND);
    assert_eq!(foreign, absent);

    // Bob's delete attempt changes nothing for Alice.
    let (status, _) = send(&app, "DELETE", &uri, Some(&bob), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &uri, Some(&alice), None).await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_fitness_goal_over_http() -> Result<()> {
    let app = create_test_app().await?;
    let token = register_and_login(&app, "alice").await?;

    let (status, goal) = send(
        &app,
        "POST",
        "/api/fitness-goal",
        Some(&token),
        Some(json!({
            "current_weight": 85.0,
            "target_weight": 80.0,
            "exercise_goals": [
                { "exercise_name": "squat", "target_sets": 5, "target_reps": 8 }
            ]
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["exercise_goals"][0]["exercise"]["name"], "Squat");

    // Only one goal per user.
    let (status, body) = send(
        &app,
        "POST",
        "/api/fitness-goal",
        Some(&token),
        Some(json!({ "current_weight": 85.0, "target_weight": 79.0 })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    // The sub-goals are listable on their own.
    let (status, body) = send(&app, "GET", "/api/exercise-goals", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exercise_goals"].as_array().unwrap().len(), 1);

    // Deleting the goal removes the sub-goals with it.
    let (status, _) = send(&app, "DELETE", "/api/fitness-goal", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = send(&app, "GET", "/api/exercise-goals", Some(&token), None).await?;
    assert!(body["exercise_goals"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_profile_update_over_http() -> Result<()> {
    let app = create_test_app().await?;
    let token = register_and_login(&app, "alice").await?;

    let (status, profile) = send(
        &app,
        "PUT",
        "/api/profile",
        Some(&token),
        Some(json!({ "weight_kg": 82.5, "age": 30 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["weight_kg"], 82.5);
    assert_eq!(profile["age"], 30);

    // Unknown fields are dropped, not written anywhere.
    let (status, profile) = send(
        &app,
        "PUT",
        "/api/profile",
        Some(&token),
        Some(json!({ "height_cm": 180.0, "is_admin": true })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["weight_kg"], 82.5);
    assert!(profile.get("is_admin").is_none());

    Ok(())
}

#[tokio::test]
async fn test_session_logging_over_http() -> Result<()> {
    let app = create_test_app().await?;
    let token = register_and_login(&app, "alice").await?;

    let (_, plan) = send(
        &app,
        "POST",
        "/api/workout-plans",
        Some(&token),
        Some(json!({ "name": "Leg Day" })),
    )
    .await?;
    let plan_id = plan["id"].as_i64().unwrap();

    let (status, session) = send(
        &app,
        "POST",
        "/api/workout-sessions",
        Some(&token),
        Some(json!({
            "workout_plan_id": plan_id,
            "duration_minutes": 45,
            "notes": "Felt strong"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["workout_plan_id"], plan_id);

    let (status, body) = send(&app, "GET", "/api/workout-sessions", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workout_sessions"].as_array().unwrap().len(), 1);

    let uri = format!("/api/workout-sessions/{}", session["id"]);
    let (status, fetched) = send(&app, "GET", &uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["notes"], "Felt strong");

    Ok(())
}
