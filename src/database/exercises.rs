// ABOUTME: Exercise catalog database operations
// ABOUTME: Read-only lookups by id and case-insensitive name, plus importer inserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

use super::Database;
use crate::errors::AppResult;
use crate::models::Exercise;
use serde::Deserialize;
use sqlx::Row;

/// A catalog row to insert, as read from the import file
#[derive(Debug, Clone, Deserialize)]
pub struct NewExercise {
    pub name: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub target_muscles: Option<String>,
    pub difficulty: i64,
}

pub(super) fn row_to_exercise(row: &sqlx::sqlite::SqliteRow) -> AppResult<Exercise> {
    Ok(Exercise {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        instructions: row.try_get("instructions")?,
        target_muscles: row.try_get("target_muscles")?,
        difficulty: row.try_get("difficulty")?,
    })
}

impl Database {
    /// List the full catalog in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_exercises(&self) -> AppResult<Vec<Exercise>> {
        let rows = sqlx::query("SELECT * FROM exercises ORDER BY id")
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(row_to_exercise).collect()
    }

    /// Look up a catalog exercise by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_exercise_by_id(&self, exercise_id: i64) -> AppResult<Option<Exercise>> {
        let row = sqlx::query("SELECT * FROM exercises WHERE id = ?1")
            .bind(exercise_id)
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(row_to_exercise).transpose()
    }

    /// Look up a catalog exercise by name, case-insensitively
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_exercise_by_name(&self, name: &str) -> AppResult<Option<Exercise>> {
        let row = sqlx::query("SELECT * FROM exercises WHERE name = ?1 COLLATE NOCASE")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(row_to_exercise).transpose()
    }

    /// Insert a catalog row. Used by the bulk importer and test setup; the
    /// request path never mutates the catalog.
    ///
    /// # Errors
    ///
    /// Returns a conflict error on a duplicate name, or a validation error
    /// from the difficulty check constraint
    pub async fn insert_exercise(&self, exercise: &NewExercise) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO exercises (name, description, instructions, target_muscles, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(&exercise.name)
        .bind(&exercise.description)
        .bind(&exercise.instructions)
        .bind(&exercise.target_muscles)
        .bind(exercise.difficulty)
        .execute(self.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }
}
