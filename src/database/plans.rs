// ABOUTME: Workout plan aggregate operations - atomic composite create, ownership-scoped CRUD
// ABOUTME: A plan and its selected exercises and goal are written and destroyed as one unit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! Workout plan aggregate.
//!
//! Creation validates every catalog reference before any row is written,
//! then inserts the plan row, its selected-exercise rows, and the optional
//! goal row inside one transaction: either the whole aggregate commits and
//! is fully queryable, or nothing survives. Parent rows are written before
//! children so a concurrent reader never sees a child without its parent.
//!
//! Every lookup is scoped by `(id, user_id)`. A plan that does not exist and
//! a plan owned by someone else produce the same `NotFound`.

use super::exercises::row_to_exercise;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{
    SelectedExerciseDetail, WorkoutPlan, WorkoutPlanDetail, WorkoutPlanSummary,
};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

/// One selected-exercise entry in a plan creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedExerciseSpec {
    /// Catalog exercise to include; must resolve before anything is written
    pub exercise_id: Option<i64>,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub duration: Option<String>,
    pub distance: Option<String>,
}

/// Composite plan creation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkoutPlanRequest {
    pub name: Option<String>,
    pub frequency: Option<String>,
    pub session_duration: Option<i64>,
    /// Optional weight target; stored as the plan's goal row
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub selected_exercises: Vec<SelectedExerciseSpec>,
}

/// Allow-listed plan fields settable after creation. Selected exercises are
/// managed through their own sub-resource operations; they cannot be patched
/// through the plan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkoutPlanRequest {
    pub name: Option<String>,
    pub frequency: Option<String>,
    pub session_duration: Option<i64>,
    pub target_weight: Option<f64>,
}

/// Allow-listed selected-exercise fields settable after creation. The
/// catalog reference is fixed at insert time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSelectedExerciseRequest {
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub duration: Option<String>,
    pub distance: Option<String>,
}

fn row_to_plan(row: &sqlx::sqlite::SqliteRow) -> AppResult<WorkoutPlan> {
    let user_id: String = row.try_get("user_id")?;
    Ok(WorkoutPlan {
        id: row.try_get("id")?,
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::internal(format!("Corrupt user id in database: {e}")))?,
        name: row.try_get("name")?,
        frequency: row.try_get("frequency")?,
        session_duration: row.try_get("session_duration")?,
    })
}

fn row_to_selected_detail(row: &sqlx::sqlite::SqliteRow) -> AppResult<SelectedExerciseDetail> {
    Ok(SelectedExerciseDetail {
        id: row.try_get("selected_id")?,
        exercise: row_to_exercise(row)?,
        sets: row.try_get("sets")?,
        reps: row.try_get("reps")?,
        duration: row.try_get("duration")?,
        distance: row.try_get("distance")?,
    })
}

/// Join of a plan's selected-exercise rows with their catalog entries.
/// `e.*` supplies the columns `row_to_exercise` expects.
const SELECTED_DETAIL_QUERY: &str = r"
    SELECT se.id AS selected_id, se.sets, se.reps, se.duration, se.distance, e.*
    FROM selected_exercises se
    JOIN exercises e ON e.id = se.exercise_id
    WHERE se.workout_plan_id = ?1
    ORDER BY se.id
";

impl Database {
    /// Create a workout plan aggregate: plan row, selected-exercise rows,
    /// and optional goal row, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is missing, the exercise list
    /// is empty while `allow_empty` is false, or any exercise reference does
    /// not resolve against the catalog (checked before any write). Storage
    /// failures roll the whole transaction back.
    pub async fn create_workout_plan(
        &self,
        user_id: Uuid,
        request: &CreateWorkoutPlanRequest,
        allow_empty: bool,
    ) -> AppResult<WorkoutPlanDetail> {
        let name = request
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::missing_field("name"))?;

        if !allow_empty && request.selected_exercises.is_empty() {
            return Err(AppError::invalid_input(
                "A workout plan must contain at least one exercise",
            ));
        }

        // Resolve every catalog reference up front; the first failure aborts
        // before a single row is written.
        for spec in &request.selected_exercises {
            let exercise_id = spec
                .exercise_id
                .ok_or_else(|| AppError::missing_field("exercise_id"))?;
            if self.get_exercise_by_id(exercise_id).await?.is_none() {
                return Err(AppError::invalid_input(format!(
                    "Exercise {exercise_id} not found in catalog"
                )));
            }
        }

        let mut tx = self.pool().begin().await?;

        let plan_id = sqlx::query(
            r"
            INSERT INTO workout_plans (user_id, name, frequency, session_duration)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(user_id.to_string())
        .bind(name)
        .bind(&request.frequency)
        .bind(request.session_duration)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for spec in &request.selected_exercises {
            sqlx::query(
                r"
                INSERT INTO selected_exercises
                    (workout_plan_id, exercise_id, sets, reps, duration, distance)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(plan_id)
            .bind(spec.exercise_id)
            .bind(spec.sets)
            .bind(spec.reps)
            .bind(&spec.duration)
            .bind(&spec.distance)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(target_weight) = request.target_weight {
            sqlx::query(
                "INSERT INTO workout_goals (workout_plan_id, target_weight) VALUES (?1, ?2)",
            )
            .bind(plan_id)
            .bind(target_weight)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::transaction_failure(format!("Plan creation commit failed: {e}"))
        })?;

        tracing::info!("Created workout plan {plan_id} for user {user_id}");
        self.get_plan_detail(plan_id, user_id).await
    }

    /// List the caller's plan summaries in creation order. Never errors on
    /// an empty result.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_plans(&self, user_id: Uuid) -> AppResult<Vec<WorkoutPlanSummary>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, frequency, session_duration
            FROM workout_plans WHERE user_id = ?1 ORDER BY id
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await?;

        rows.iter()
            .map(|row| {
                Ok(WorkoutPlanSummary {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    frequency: row.try_get("frequency")?,
                    session_duration: row.try_get("session_duration")?,
                })
            })
            .collect()
    }

    /// Fetch a plan only if it belongs to the caller. Absent and foreign
    /// plans are indistinguishable.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no owned plan matches
    pub async fn get_plan_owned(&self, plan_id: i64, user_id: Uuid) -> AppResult<WorkoutPlan> {
        let row = sqlx::query("SELECT * FROM workout_plans WHERE id = ?1 AND user_id = ?2")
            .bind(plan_id)
            .bind(user_id.to_string())
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| AppError::not_found("Workout plan"))?;

        row_to_plan(&row)
    }

    /// Fetch the full plan aggregate: plan fields, optional goal, and the
    /// selected exercises joined with their catalog entries.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no owned plan matches
    pub async fn get_plan_detail(
        &self,
        plan_id: i64,
        user_id: Uuid,
    ) -> AppResult<WorkoutPlanDetail> {
        let plan = self.get_plan_owned(plan_id, user_id).await?;

        let target_weight = sqlx::query(
            "SELECT target_weight FROM workout_goals WHERE workout_plan_id = ?1",
        )
        .bind(plan_id)
        .fetch_optional(self.pool())
        .await?
        .map(|row| row.try_get("target_weight"))
        .transpose()?;

        let rows = sqlx::query(SELECTED_DETAIL_QUERY)
            .bind(plan_id)
            .fetch_all(self.pool())
            .await?;
        let selected_exercises = rows
            .iter()
            .map(row_to_selected_detail)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(WorkoutPlanDetail {
            id: plan.id,
            name: plan.name,
            frequency: plan.frequency,
            session_duration: plan.session_duration,
            target_weight,
            selected_exercises,
        })
    }

    /// Apply an allow-listed field update to an owned plan. The goal row is
    /// upserted when a new target weight is supplied; both writes share one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no owned plan matches
    pub async fn update_plan(
        &self,
        plan_id: i64,
        user_id: Uuid,
        update: &UpdateWorkoutPlanRequest,
    ) -> AppResult<WorkoutPlanDetail> {
        // Ownership check first; the update below is keyed the same way.
        self.get_plan_owned(plan_id, user_id).await?;

        let mut tx = self.pool().begin().await?;

        sqlx::query(
            r"
            UPDATE workout_plans SET
                name = COALESCE(?1, name),
                frequency = COALESCE(?2, frequency),
                session_duration = COALESCE(?3, session_duration)
            WHERE id = ?4 AND user_id = ?5
            ",
        )
        .bind(&update.name)
        .bind(&update.frequency)
        .bind(update.session_duration)
        .bind(plan_id)
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await?;

        if let Some(target_weight) = update.target_weight {
            sqlx::query(
                r"
                INSERT INTO workout_goals (workout_plan_id, target_weight)
                VALUES (?1, ?2)
                ON CONFLICT(workout_plan_id) DO UPDATE SET target_weight = excluded.target_weight
                ",
            )
            .bind(plan_id)
            .bind(target_weight)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::transaction_failure(format!("Plan update commit failed: {e}"))
        })?;

        self.get_plan_detail(plan_id, user_id).await
    }

    /// Delete an owned plan. Selected exercises and the goal row cascade
    /// inside the same transaction; a partial delete cannot be observed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no owned plan matches
    pub async fn delete_plan(&self, plan_id: i64, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM workout_plans WHERE id = ?1 AND user_id = ?2")
            .bind(plan_id)
            .bind(user_id.to_string())
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Workout plan"));
        }
        tracing::info!("Deleted workout plan {plan_id} for user {user_id}");
        Ok(())
    }

    /// List the selected exercises of an owned plan
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no owned plan matches
    pub async fn list_plan_exercises(
        &self,
        plan_id: i64,
        user_id: Uuid,
    ) -> AppResult<Vec<SelectedExerciseDetail>> {
        self.get_plan_owned(plan_id, user_id).await?;

        let rows = sqlx::query(SELECTED_DETAIL_QUERY)
            .bind(plan_id)
            .fetch_all(self.pool())
            .await?;
        rows.iter().map(row_to_selected_detail).collect()
    }

    /// Add one exercise to an owned plan
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no owned plan matches, or a validation error if
    /// the catalog reference does not resolve
    pub async fn add_plan_exercise(
        &self,
        plan_id: i64,
        user_id: Uuid,
        spec: &SelectedExerciseSpec,
    ) -> AppResult<SelectedExerciseDetail> {
        self.get_plan_owned(plan_id, user_id).await?;

        let exercise_id = spec
            .exercise_id
            .ok_or_else(|| AppError::missing_field("exercise_id"))?;
        if self.get_exercise_by_id(exercise_id).await?.is_none() {
            return Err(AppError::invalid_input(format!(
                "Exercise {exercise_id} not found in catalog"
            )));
        }

        let selected_id = sqlx::query(
            r"
            INSERT INTO selected_exercises
                (workout_plan_id, exercise_id, sets, reps, duration, distance)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(plan_id)
        .bind(exercise_id)
        .bind(spec.sets)
        .bind(spec.reps)
        .bind(&spec.duration)
        .bind(&spec.distance)
        .execute(self.pool())
        .await?
        .last_insert_rowid();

        self.get_plan_exercise(plan_id, user_id, selected_id).await
    }

    /// Fetch one selected exercise of an owned plan. The child is only
    /// addressable through its plan id plus the owner check, never by bare
    /// child id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is not owned or the entry is not in it
    pub async fn get_plan_exercise(
        &self,
        plan_id: i64,
        user_id: Uuid,
        selected_id: i64,
    ) -> AppResult<SelectedExerciseDetail> {
        self.get_plan_owned(plan_id, user_id).await?;

        let row = sqlx::query(
            r"
            SELECT se.id AS selected_id, se.sets, se.reps, se.duration, se.distance, e.*
            FROM selected_exercises se
            JOIN exercises e ON e.id = se.exercise_id
            WHERE se.id = ?1 AND se.workout_plan_id = ?2
            ",
        )
        .bind(selected_id)
        .bind(plan_id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| AppError::not_found("Selected exercise"))?;

        row_to_selected_detail(&row)
    }

    /// Apply an allow-listed field update to one selected exercise
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is not owned or the entry is not in it
    pub async fn update_plan_exercise(
        &self,
        plan_id: i64,
        user_id: Uuid,
        selected_id: i64,
        update: &UpdateSelectedExerciseRequest,
    ) -> AppResult<SelectedExerciseDetail> {
        self.get_plan_owned(plan_id, user_id).await?;

        let result = sqlx::query(
            r"
            UPDATE selected_exercises SET
                sets = COALESCE(?1, sets),
                reps = COALESCE(?2, reps),
                duration = COALESCE(?3, duration),
                distance = COALESCE(?4, distance)
            WHERE id = ?5 AND workout_plan_id = ?6
            ",
        )
        .bind(update.sets)
        .bind(update.reps)
        .bind(&update.duration)
        .bind(&update.distance)
        .bind(selected_id)
        .bind(plan_id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Selected exercise"));
        }

        self.get_plan_exercise(plan_id, user_id, selected_id).await
    }

    /// Remove one selected exercise from an owned plan
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is not owned or the entry is not in it
    pub async fn delete_plan_exercise(
        &self,
        plan_id: i64,
        user_id: Uuid,
        selected_id: i64,
    ) -> AppResult<()> {
        self.get_plan_owned(plan_id, user_id).await?;

        let result =
            sqlx::query("DELETE FROM selected_exercises WHERE id = ?1 AND workout_plan_id = ?2")
                .bind(selected_id)
                .bind(plan_id)
                .execute(self.pool())
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Selected exercise"));
        }
        Ok(())
    }
}
