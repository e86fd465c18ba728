// ABOUTME: Fitness goal aggregate operations - one goal per user with exercise sub-goals
// ABOUTME: Sub-goal catalog references resolve by case-insensitive name before any write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! Fitness goal aggregate.
//!
//! Each user has at most one fitness goal, created together with its
//! exercise sub-goals in one transaction. Sub-goal specs name their catalog
//! exercise case-insensitively; the first unresolved name aborts the whole
//! creation before any row is written. Deleting the goal removes its
//! sub-goals in the same transaction.

use super::exercises::row_to_exercise;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{ExerciseGoalDetail, FitnessGoal, FitnessGoalDetail};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

/// One exercise sub-goal in a fitness goal creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseGoalSpec {
    /// Catalog exercise name, matched case-insensitively
    pub exercise_name: Option<String>,
    pub target_sets: Option<i64>,
    pub target_reps: Option<i64>,
    pub target_duration: Option<String>,
    pub target_distance: Option<String>,
}

/// Composite fitness goal creation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFitnessGoalRequest {
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub target_body_fat_pct: Option<f64>,
    pub target_muscle_mass_kg: Option<f64>,
    #[serde(default)]
    pub exercise_goals: Vec<ExerciseGoalSpec>,
}

/// Allow-listed fitness goal fields settable after creation. Sub-goals are
/// replaced by deleting and recreating the aggregate, not patched in place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFitnessGoalRequest {
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub target_body_fat_pct: Option<f64>,
    pub target_muscle_mass_kg: Option<f64>,
}

fn row_to_goal(row: &sqlx::sqlite::SqliteRow) -> AppResult<FitnessGoal> {
    let user_id: String = row.try_get("user_id")?;
    Ok(FitnessGoal {
        id: row.try_get("id")?,
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::internal(format!("Corrupt user id in database: {e}")))?,
        current_weight: row.try_get("current_weight")?,
        target_weight: row.try_get("target_weight")?,
        target_body_fat_pct: row.try_get("target_body_fat_pct")?,
        target_muscle_mass_kg: row.try_get("target_muscle_mass_kg")?,
    })
}

fn row_to_exercise_goal_detail(row: &sqlx::sqlite::SqliteRow) -> AppResult<ExerciseGoalDetail> {
    Ok(ExerciseGoalDetail {
        id: row.try_get("goal_id")?,
        exercise: row_to_exercise(row)?,
        target_sets: row.try_get("target_sets")?,
        target_reps: row.try_get("target_reps")?,
        target_duration: row.try_get("target_duration")?,
        target_distance: row.try_get("target_distance")?,
    })
}

const EXERCISE_GOAL_DETAIL_QUERY: &str = r"
    SELECT eg.id AS goal_id, eg.target_sets, eg.target_reps,
           eg.target_duration, eg.target_distance, e.*
    FROM exercise_goals eg
    JOIN exercises e ON e.id = eg.exercise_id
    WHERE eg.user_id = ?1
    ORDER BY eg.id
";

impl Database {
    /// Create the caller's fitness goal aggregate: the goal row and every
    /// exercise sub-goal row, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required weight is missing or any
    /// sub-goal names an exercise the catalog does not contain (checked
    /// before any write), and a conflict error if the caller already has a
    /// fitness goal
    pub async fn create_fitness_goal(
        &self,
        user_id: Uuid,
        request: &CreateFitnessGoalRequest,
    ) -> AppResult<FitnessGoalDetail> {
        let current_weight = request
            .current_weight
            .ok_or_else(|| AppError::missing_field("current_weight"))?;
        let target_weight = request
            .target_weight
            .ok_or_else(|| AppError::missing_field("target_weight"))?;

        // Resolve every sub-goal's exercise name before writing anything.
        let mut resolved = Vec::with_capacity(request.exercise_goals.len());
        for spec in &request.exercise_goals {
            let name = spec
                .exercise_name
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .ok_or_else(|| AppError::missing_field("exercise_name"))?;
            let exercise = self.get_exercise_by_name(name).await?.ok_or_else(|| {
                AppError::invalid_input(format!("Exercise \"{name}\" not found in catalog"))
            })?;
            resolved.push((exercise.id, spec));
        }

        let mut tx = self.pool().begin().await?;

        sqlx::query(
            r"
            INSERT INTO fitness_goals
                (user_id, current_weight, target_weight, target_body_fat_pct, target_muscle_mass_kg)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(user_id.to_string())
        .bind(current_weight)
        .bind(target_weight)
        .bind(request.target_body_fat_pct)
        .bind(request.target_muscle_mass_kg)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::conflict("A fitness goal already exists for this user")
            }
            _ => e.into(),
        })?;

        for (exercise_id, spec) in resolved {
            sqlx::query(
                r"
                INSERT INTO exercise_goals
                    (user_id, exercise_id, target_sets, target_reps,
                     target_duration, target_distance)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(user_id.to_string())
            .bind(exercise_id)
            .bind(spec.target_sets)
            .bind(spec.target_reps)
            .bind(&spec.target_duration)
            .bind(&spec.target_distance)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::transaction_failure(format!("Fitness goal commit failed: {e}"))
        })?;

        tracing::info!("Created fitness goal for user {user_id}");
        self.get_fitness_goal(user_id).await
    }

    /// Fetch the caller's fitness goal with its nested exercise sub-goals
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the caller has no fitness goal
    pub async fn get_fitness_goal(&self, user_id: Uuid) -> AppResult<FitnessGoalDetail> {
        let row = sqlx::query("SELECT * FROM fitness_goals WHERE user_id = ?1")
            .bind(user_id.to_string())
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| AppError::not_found("Fitness goal"))?;
        let goal = row_to_goal(&row)?;

        let exercise_goals = self.list_exercise_goals(user_id).await?;

        Ok(FitnessGoalDetail {
            id: goal.id,
            current_weight: goal.current_weight,
            target_weight: goal.target_weight,
            target_body_fat_pct: goal.target_body_fat_pct,
            target_muscle_mass_kg: goal.target_muscle_mass_kg,
            exercise_goals,
        })
    }

    /// Apply an allow-listed field update to the caller's fitness goal
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the caller has no fitness goal
    pub async fn update_fitness_goal(
        &self,
        user_id: Uuid,
        update: &UpdateFitnessGoalRequest,
    ) -> AppResult<FitnessGoalDetail> {
        let result = sqlx::query(
            r"
            UPDATE fitness_goals SET
                current_weight = COALESCE(?1, current_weight),
                target_weight = COALESCE(?2, target_weight),
                target_body_fat_pct = COALESCE(?3, target_body_fat_pct),
                target_muscle_mass_kg = COALESCE(?4, target_muscle_mass_kg)
            WHERE user_id = ?5
            ",
        )
        .bind(update.current_weight)
        .bind(update.target_weight)
        .bind(update.target_body_fat_pct)
        .bind(update.target_muscle_mass_kg)
        .bind(user_id.to_string())
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Fitness goal"));
        }

        self.get_fitness_goal(user_id).await
    }

    /// Delete the caller's fitness goal and its exercise sub-goals in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the caller has no fitness goal
    pub async fn delete_fitness_goal(&self, user_id: Uuid) -> AppResult<()> {
        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM exercise_goals WHERE user_id = ?1")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM fitness_goals WHERE user_id = ?1")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Nothing deleted: roll back the sub-goal delete as well.
            tx.rollback().await?;
            return Err(AppError::not_found("Fitness goal"));
        }

        tx.commit().await.map_err(|e| {
            AppError::transaction_failure(format!("Fitness goal delete commit failed: {e}"))
        })?;
        Ok(())
    }

    /// List the caller's exercise sub-goals joined with their catalog
    /// entries, in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_exercise_goals(&self, user_id: Uuid) -> AppResult<Vec<ExerciseGoalDetail>> {
        let rows = sqlx::query(EXERCISE_GOAL_DETAIL_QUERY)
            .bind(user_id.to_string())
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(row_to_exercise_goal_detail).collect()
    }
}
