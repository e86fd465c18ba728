// ABOUTME: User account and profile database operations
// ABOUTME: Handles transactional registration, lookups, profile updates, and account deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{User, UserProfile};
use chrono::Utc;
use serde::Deserialize;
use sqlx::Row;
use uuid::Uuid;

/// Allow-listed profile fields settable from the outside. Fields absent from
/// the request leave the stored value untouched; unknown JSON keys are
/// dropped during deserialization and never reach a column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<i64>,
    pub body_fat_pct: Option<f64>,
    pub muscle_mass_kg: Option<f64>,
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> AppResult<User> {
    let id: String = row.try_get("id")?;
    Ok(User {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::internal(format!("Corrupt user id in database: {e}")))?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
        last_active: row.try_get("last_active")?,
    })
}

fn row_to_profile(row: &sqlx::sqlite::SqliteRow) -> AppResult<UserProfile> {
    let user_id: String = row.try_get("user_id")?;
    Ok(UserProfile {
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::internal(format!("Corrupt user id in database: {e}")))?,
        weight_kg: row.try_get("weight_kg")?,
        height_cm: row.try_get("height_cm")?,
        age: row.try_get("age")?,
        body_fat_pct: row.try_get("body_fat_pct")?,
        muscle_mass_kg: row.try_get("muscle_mass_kg")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Database {
    /// Register a new user: the account row and its empty profile row are
    /// inserted in one transaction, so no account ever exists without a
    /// profile.
    ///
    /// # Errors
    ///
    /// Returns a conflict error if the username is already taken (detected
    /// at commit by the unique constraint), or a database error otherwise
    pub async fn register_user(&self, user: &User) -> AppResult<Uuid> {
        let mut tx = self.pool().begin().await?;

        sqlx::query(
            r"
            INSERT INTO users (id, username, password_hash, created_at, last_active)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.last_active)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::conflict("Username already taken")
            }
            _ => e.into(),
        })?;

        sqlx::query(
            r"
            INSERT INTO user_profiles (user_id, created_at, updated_at)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(user.id.to_string())
        .bind(user.created_at)
        .bind(user.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::transaction_failure(format!("Registration commit failed: {e}")))?;

        Ok(user.id)
    }

    /// Look up a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?1")
            .bind(user_id.to_string())
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Look up a user by username (exact match)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?1")
            .bind(username)
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Record account activity (called on login)
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_last_active(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_active = ?1 WHERE id = ?2")
            .bind(Utc::now())
            .bind(user_id.to_string())
            .execute(self.pool())
            .await?;
        Ok(())
    }

    /// Fetch a user's profile
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user has no profile row
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        let row = sqlx::query("SELECT * FROM user_profiles WHERE user_id = ?1")
            .bind(user_id.to_string())
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;

        row_to_profile(&row)
    }

    /// Apply an allow-listed field update to a user's profile
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user has no profile row
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: &UpdateProfileRequest,
    ) -> AppResult<UserProfile> {
        let result = sqlx::query(
            r"
            UPDATE user_profiles SET
                weight_kg = COALESCE(?1, weight_kg),
                height_cm = COALESCE(?2, height_cm),
                age = COALESCE(?3, age),
                body_fat_pct = COALESCE(?4, body_fat_pct),
                muscle_mass_kg = COALESCE(?5, muscle_mass_kg),
                updated_at = ?6
            WHERE user_id = ?7
            ",
        )
        .bind(update.weight_kg)
        .bind(update.height_cm)
        .bind(update.age)
        .bind(update.body_fat_pct)
        .bind(update.muscle_mass_kg)
        .bind(Utc::now())
        .bind(user_id.to_string())
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Profile"));
        }

        self.get_profile(user_id).await
    }

    /// Delete a user account. Profile, fitness goal, exercise goals, workout
    /// plans (with their children), and sessions all go with it, enforced by
    /// the schema's cascade rules within the single delete transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such user exists
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(user_id.to_string())
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User"));
        }
        Ok(())
    }
}
