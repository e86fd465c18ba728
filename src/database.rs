// ABOUTME: Database management for users, catalog, and owned fitness aggregates
// ABOUTME: Owns the SQLite pool, schema migration, and cascade-delete constraints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! # Database Management
//!
//! SQLite-backed storage for the workout tracker. One table per entity,
//! foreign keys enforced on every connection, and `ON DELETE CASCADE` on
//! every parent→child edge of an aggregate. The shared exercise catalog is
//! referenced with `ON DELETE RESTRICT`: owned rows never take catalog rows
//! with them, and the catalog never silently orphans owned rows.
//!
//! Operations are grouped by aggregate in submodules, all implemented on the
//! [`Database`] handle:
//!
//! - [`users`]: accounts and profiles (registration is a two-row transaction)
//! - [`exercises`]: read-only catalog lookups and importer inserts
//! - [`plans`]: the workout-plan aggregate (plan + selected exercises + goal)
//! - [`goals`]: the fitness-goal aggregate (goal + exercise sub-goals)
//! - [`sessions`]: logged workout sessions

pub mod exercises;
pub mod goals;
pub mod plans;
pub mod sessions;
pub mod users;

use crate::errors::AppResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// Database handle for all persistent storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if missing) the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or the
    /// schema migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(sqlx::Error::from)?
            .create_if_missing(true)
            // Cascade and restrict rules below depend on this pragma.
            .foreign_keys(true);

        // An in-memory database exists per connection; more than one pooled
        // connection would each see an empty schema.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new().max_connections(1)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Access the underlying pool (importer and tests)
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Create all tables and indexes
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_active TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                weight_kg REAL,
                height_cm REAL,
                age INTEGER,
                body_fat_pct REAL,
                muscle_mass_kg REAL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                description TEXT,
                instructions TEXT,
                target_muscles TEXT,
                difficulty INTEGER NOT NULL CHECK (difficulty BETWEEN 1 AND 3)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_plans (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                frequency TEXT,
                session_duration INTEGER
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS selected_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_plan_id INTEGER NOT NULL
                    REFERENCES workout_plans(id) ON DELETE CASCADE,
                exercise_id INTEGER NOT NULL
                    REFERENCES exercises(id) ON DELETE RESTRICT,
                sets INTEGER,
                reps INTEGER,
                duration TEXT,
                distance TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_goals (
                workout_plan_id INTEGER PRIMARY KEY
                    REFERENCES workout_plans(id) ON DELETE CASCADE,
                target_weight REAL NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS fitness_goals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT UNIQUE NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                current_weight REAL NOT NULL,
                target_weight REAL NOT NULL,
                target_body_fat_pct REAL,
                target_muscle_mass_kg REAL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_goals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                exercise_id INTEGER NOT NULL
                    REFERENCES exercises(id) ON DELETE RESTRICT,
                target_sets INTEGER,
                target_reps INTEGER,
                target_duration TEXT,
                target_distance TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                workout_plan_id INTEGER NOT NULL
                    REFERENCES workout_plans(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                notes TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_username ON users(username)")
            .execute(&self.pool)
            .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_plans_user ON workout_plans(user_id)",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_selected_exercises_plan \
             ON selected_exercises(workout_plan_id)",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercise_goals_user ON exercise_goals(user_id)",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_sessions_user ON workout_sessions(user_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
