// ABOUTME: Core data models for the workout tracker domain
// ABOUTME: Defines User, Exercise, WorkoutPlan, FitnessGoal and related aggregate types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! # Data Models
//!
//! Core data structures used throughout the workout tracker.
//!
//! ## Design Principles
//!
//! - **Serializable**: all models support JSON serialization for the REST API
//! - **Type Safe**: strong typing prevents common data handling errors
//! - **Aggregate-shaped**: detail types carry a parent together with its owned
//!   children, matching the unit in which they are created and deleted
//!
//! ## Core Models
//!
//! - `User` / `UserProfile`: account identity and body metrics
//! - `Exercise`: shared, read-only catalog entry
//! - `WorkoutPlan` + `SelectedExercise` + `WorkoutGoal`: the plan aggregate
//! - `FitnessGoal` + `ExerciseGoal`: the goal aggregate
//! - `WorkoutSession`: a logged training session referencing a plan

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Globally unique username used for login
    pub username: String,
    /// Hashed password for authentication
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// Last time the user accessed the system
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and current timestamps
    #[must_use]
    pub fn new(username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: now,
            last_active: now,
        }
    }
}

/// Body metrics for a user, one row per account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User this profile belongs to
    pub user_id: Uuid,
    /// Current body weight in kg
    pub weight_kg: Option<f64>,
    /// Height in cm
    pub height_cm: Option<f64>,
    /// Age in years
    pub age: Option<i64>,
    /// Body fat percentage
    pub body_fat_pct: Option<f64>,
    /// Muscle mass in kg
    pub muscle_mass_kg: Option<f64>,
    /// When the profile row was created
    pub created_at: DateTime<Utc>,
    /// Last profile update
    pub updated_at: DateTime<Utc>,
}

/// A catalog exercise. Shared reference data, never owned by a user and never
/// cascade-deleted by any owned row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique exercise identifier
    pub id: i64,
    /// Unique exercise name
    pub name: String,
    /// What the exercise is
    pub description: Option<String>,
    /// How to perform it
    pub instructions: Option<String>,
    /// Comma-separated muscle groups
    pub target_muscles: Option<String>,
    /// Difficulty rating, 1 (easy) to 3 (hard)
    pub difficulty: i64,
}

/// A workout plan owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: i64,
    /// Owning user
    pub user_id: Uuid,
    pub name: String,
    /// e.g. "3x/week"
    pub frequency: Option<String>,
    /// Planned session length in minutes
    pub session_duration: Option<i64>,
}

/// One exercise selected into a workout plan, with per-plan parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedExercise {
    pub id: i64,
    /// Parent plan; the row lives and dies with it
    pub workout_plan_id: i64,
    /// Catalog exercise this entry references
    pub exercise_id: i64,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub duration: Option<String>,
    pub distance: Option<String>,
}

/// Optional weight target attached to a workout plan (at most one per plan)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutGoal {
    pub workout_plan_id: i64,
    pub target_weight: f64,
}

/// A selected exercise joined with its catalog entry, as returned in plan
/// detail responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedExerciseDetail {
    pub id: i64,
    pub exercise: Exercise,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub duration: Option<String>,
    pub distance: Option<String>,
}

/// Full workout plan aggregate: the plan row plus its selected exercises and
/// optional goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlanDetail {
    pub id: i64,
    pub name: String,
    pub frequency: Option<String>,
    pub session_duration: Option<i64>,
    pub target_weight: Option<f64>,
    pub selected_exercises: Vec<SelectedExerciseDetail>,
}

/// Plan summary for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlanSummary {
    pub id: i64,
    pub name: String,
    pub frequency: Option<String>,
    pub session_duration: Option<i64>,
}

/// A user's overall fitness goal (one per user)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessGoal {
    pub id: i64,
    /// Owning user; unique, the goal is 1:1 with the account
    pub user_id: Uuid,
    pub current_weight: f64,
    pub target_weight: f64,
    pub target_body_fat_pct: Option<f64>,
    pub target_muscle_mass_kg: Option<f64>,
}

/// Per-exercise sub-goal belonging to a user's fitness goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseGoal {
    pub id: i64,
    pub user_id: Uuid,
    /// Catalog exercise this goal targets
    pub exercise_id: i64,
    pub target_sets: Option<i64>,
    pub target_reps: Option<i64>,
    pub target_duration: Option<String>,
    pub target_distance: Option<String>,
}

/// Exercise goal joined with its catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseGoalDetail {
    pub id: i64,
    pub exercise: Exercise,
    pub target_sets: Option<i64>,
    pub target_reps: Option<i64>,
    pub target_duration: Option<String>,
    pub target_distance: Option<String>,
}

/// Full fitness goal aggregate: goal row plus its exercise sub-goals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessGoalDetail {
    pub id: i64,
    pub current_weight: f64,
    pub target_weight: f64,
    pub target_body_fat_pct: Option<f64>,
    pub target_muscle_mass_kg: Option<f64>,
    pub exercise_goals: Vec<ExerciseGoalDetail>,
}

/// A logged workout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: i64,
    pub user_id: Uuid,
    /// Plan this session was performed against
    pub workout_plan_id: i64,
    /// When the session took place
    pub date: DateTime<Utc>,
    /// Session length in minutes
    pub duration_minutes: i64,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new_generates_unique_ids() {
        let a = User::new("alice".into(), "hash".into());
        let b = User::new("bob".into(), "hash".into());
        assert_ne!(a.id, b.id);
        assert_eq!(a.username, "alice");
    }

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User::new("alice".into(), "secret-hash".into());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("alice"));
    }
}
