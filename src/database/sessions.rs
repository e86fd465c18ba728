// ABOUTME: Workout session database operations
// ABOUTME: Sessions are logged against an owned plan and scoped to their user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::WorkoutSession;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::Row;
use uuid::Uuid;

/// Session creation request. The referenced plan must belong to the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkoutSessionRequest {
    pub workout_plan_id: Option<i64>,
    /// Defaults to now when omitted
    pub date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> AppResult<WorkoutSession> {
    let user_id: String = row.try_get("user_id")?;
    Ok(WorkoutSession {
        id: row.try_get("id")?,
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::internal(format!("Corrupt user id in database: {e}")))?,
        workout_plan_id: row.try_get("workout_plan_id")?,
        date: row.try_get("date")?,
        duration_minutes: row.try_get("duration_minutes")?,
        notes: row.try_get("notes")?,
    })
}

impl Database {
    /// Log a workout session against one of the caller's plans
    ///
    /// # Errors
    ///
    /// Returns a validation error if the plan id or duration is missing, and
    /// `NotFound` if the plan does not belong to the caller
    pub async fn create_session(
        &self,
        user_id: Uuid,
        request: &CreateWorkoutSessionRequest,
    ) -> AppResult<WorkoutSession> {
        let plan_id = request
            .workout_plan_id
            .ok_or_else(|| AppError::missing_field("workout_plan_id"))?;
        let duration_minutes = request
            .duration_minutes
            .ok_or_else(|| AppError::missing_field("duration_minutes"))?;

        // A session can only reference a plan the caller owns.
        self.get_plan_owned(plan_id, user_id).await?;

        let date = request.date.unwrap_or_else(Utc::now);

        let session_id = sqlx::query(
            r"
            INSERT INTO workout_sessions (user_id, workout_plan_id, date, duration_minutes, notes)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(user_id.to_string())
        .bind(plan_id)
        .bind(date)
        .bind(duration_minutes)
        .bind(&request.notes)
        .execute(self.pool())
        .await?
        .last_insert_rowid();

        self.get_session(session_id, user_id).await
    }

    /// List the caller's sessions in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_sessions(&self, user_id: Uuid) -> AppResult<Vec<WorkoutSession>> {
        let rows = sqlx::query("SELECT * FROM workout_sessions WHERE user_id = ?1 ORDER BY id")
            .bind(user_id.to_string())
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(row_to_session).collect()
    }

    /// Fetch one of the caller's sessions
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no owned session matches
    pub async fn get_session(&self, session_id: i64, user_id: Uuid) -> AppResult<WorkoutSession> {
        let row = sqlx::query("SELECT * FROM workout_sessions WHERE id = ?1 AND user_id = ?2")
            .bind(session_id)
            .bind(user_id.to_string())
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| AppError::not_found("Workout session"))?;

        row_to_session(&row)
    }
}
