// ABOUTME: Tests for workout session logging
// ABOUTME: Validates that sessions require an owned plan and disappear with it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use chrono::{TimeZone, Utc};
use sqlx::Row;
use workout_tracker::database::plans::CreateWorkoutPlanRequest;
use workout_tracker::database::sessions::CreateWorkoutSessionRequest;
use workout_tracker::database::Database;
use workout_tracker::errors::ErrorCode;
use workout_tracker::models::User;

/// Create a test database instance
///
/// # Errors
///
/// Returns an error if database initialization fails
pub async fn create_test_db() -> Result<Database> {
    // In-memory database, isolated per test
    Ok(Database::new("sqlite::memory:").await?)
}

async fn register_test_user(db: &Database, username: &str) -> Result<User> {
    let user = User::new(username.to_owned(), "hashed-password".to_owned());
    db.register_user(&user).await?;
    Ok(user)
}

async fn create_plan(db: &Database, user: &User, name: &str) -> Result<i64> {
    let plan = db
        .create_workout_plan(
            user.id,
            &CreateWorkoutPlanRequest {
                name: Some(name.to_owned()),
                frequency: None,
                session_duration: None,
                target_weight: None,
                selected_exercises: vec![],
            },
            true,
        )
        .await?;
    Ok(plan.id)
}

fn session_request(plan_id: i64, duration_minutes: i64) -> CreateWorkoutSessionRequest {
    CreateWorkoutSessionRequest {
        workout_plan_id: Some(plan_id),
        date: None,
        duration_minutes: Some(duration_minutes),
        notes: None,
    }
}

#[tokio::test]
async fn test_create_and_fetch_session() -> Result<()> {
    let db = create_test_db().await?;
    let user = register_test_user(&db, "alice").await?;
    let plan_id = create_plan(&db, &user, "Leg Day").await?;

    let date = Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap();
    let session = db
        .create_session(
            user.id,
            &CreateWorkoutSessionRequest {
                workout_plan_id: Some(plan_id),
                date: Some(date),
                duration_minutes: Some(45),
                notes: Some("Felt strong".to_owned()),
            },
        )
        .await?;

    assert_eq!(session.workout_plan_id, plan_id);
    assert_eq!(session.date, date);
    assert_eq!(session.duration_minutes, 45);

    let fetched = db.get_session(session.id, user.id).await?;
    assert_eq!(fetched.notes.as_deref(), Some("Felt strong"));

    Ok(())
}

#[tokio::test]
async fn test_session_date_defaults_to_now() -> Result<()> {
    let db = create_test_db().await?;
    let user = register_test_user(&db, "alice").await?;
    let plan_id = create_plan(&db, &user, "Leg Day").await?;

    let before = Utc::now();
    let session = db.create_session(user.id, &session_request(plan_id, 30)).await?;
    assert!(session.date >= before);

    Ok(())
}

#[tokio::test]
async fn test_session_requires_owned_plan() -> Result<()> {
    let db = create_test_db().await?;
    let alice = register_test_user(&db, "alice").await?;
    let bob = register_test_user(&db, "bob").await?;
    let plan_id = create_plan(&db, &alice, "Leg Day").await?;

    // Bob cannot log a session against Alice's plan; the plan looks absent.
    let err = db
        .create_session(bob.id, &session_request(plan_id, 30))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    // Nor against a plan that does not exist at all.
    let err = db
        .create_session(bob.id, &session_request(9999, 30))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    Ok(())
}

#[tokio::test]
async fn test_session_requires_duration() -> Result<()> {
    let db = create_test_db().await?;
    let user = register_test_user(&db, "alice").await?;
    let plan_id = create_plan(&db, &user, "Leg Day").await?;

    let err = db
        .create_session(
            user.id,
            &CreateWorkoutSessionRequest {
                workout_plan_id: Some(plan_id),
                date: None,
                duration_minutes: None,
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    Ok(())
}

#[tokio::test]
async fn test_sessions_list_in_creation_order_scoped_to_owner() -> Result<()> {
    let db = create_test_db().await?;
    let alice = register_test_user(&db, "alice").await?;
    let bob = register_test_user(&db, "bob").await?;
    let alice_plan = create_plan(&db, &alice, "Leg Day").await?;
    let bob_plan = create_plan(&db, &bob, "Push Day").await?;

    let first = db.create_session(alice.id, &session_request(alice_plan, 30)).await?;
    let second = db.create_session(alice.id, &session_request(alice_plan, 60)).await?;
    db.create_session(bob.id, &session_request(bob_plan, 20)).await?;

    let sessions = db.list_sessions(alice.id).await?;
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id, first.id);
    assert_eq!(sessions[1].id, second.id);

    // Alice cannot fetch Bob's session by id.
    let bob_sessions = db.list_sessions(bob.id).await?;
    let err = db
        .get_session(bob_sessions[0].id, alice.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    Ok(())
}

#[tokio::test]
async fn test_plan_delete_cascades_sessions() -> Result<()> {
    let db = create_test_db().await?;
    let user = register_test_user(&db, "alice").await?;
    let plan_id = create_plan(&db, &user, "Leg Day").await?;
    db.create_session(user.id, &session_request(plan_id, 30)).await?;

    db.delete_plan(plan_id, user.id).await?;

    let row = sqlx::query("SELECT COUNT(*) AS n FROM workout_sessions")
        .fetch_one(db.pool())
        .await?;
    assert_eq!(row.try_get::<i64, _>("n")?, 0);
    assert!(db.list_sessions(user.id).await?.is_empty());

    Ok(())
}
