// ABOUTME: Database operations for dated cooking logs with ratings and notes
// ABOUTME: Handles owner-scoped edits and per-recipe listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use savourly_core::models::CookingLog;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// Request to record a cooking attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCookingLog {
    /// When the recipe was cooked; defaults to now
    pub cooked_at: Option<DateTime<Utc>>,
    /// Optional star rating, 1 to 5
    pub rating: Option<i64>,
    /// Optional free-text notes
    pub notes: Option<String>,
}

/// Request to edit an existing cooking log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCookingLog {
    /// New cooked-at timestamp
    pub cooked_at: DateTime<Utc>,
    /// New rating, 1 to 5
    pub rating: Option<i64>,
    /// New notes
    pub notes: Option<String>,
}

/// Cooking-log database operations manager
pub struct CookingLogsManager {
    pool: SqlitePool,
}

impl CookingLogsManager {
    /// Create a new cooking-logs manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a cooking attempt for a recipe
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for ratings outside 1-5,
    /// `ResourceNotFound` when the recipe does not exist, or a database
    /// error.
    pub async fn add(
        &self,
        recipe_id: Uuid,
        user_id: Uuid,
        log: &NewCookingLog,
    ) -> AppResult<CookingLog> {
        validate_rating(log.rating)?;

        let exists = sqlx::query("SELECT 1 FROM recipes WHERE id = $1")
            .bind(recipe_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;
        if exists.is_none() {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }

        let id = Uuid::new_v4();
        let cooked_at = log.cooked_at.unwrap_or_else(Utc::now);
        let notes = trimmed_notes(log.notes.as_deref());

        sqlx::query(
            r"
            INSERT INTO cooking_logs (id, recipe_id, user_id, cooked_at, rating, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(id.to_string())
        .bind(recipe_id.to_string())
        .bind(user_id.to_string())
        .bind(cooked_at.to_rfc3339())
        .bind(log.rating)
        .bind(&notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add cooking log: {e}")))?;

        Ok(CookingLog {
            id,
            recipe_id,
            user_id,
            cooked_at,
            rating: log.rating,
            notes,
        })
    }

    /// Edit a cooking log
    ///
    /// Owner-scoped: returns `None` when the log does not exist or belongs
    /// to another user.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for ratings outside 1-5 or a database error.
    pub async fn update(
        &self,
        log_id: Uuid,
        user_id: Uuid,
        update: &UpdateCookingLog,
    ) -> AppResult<Option<CookingLog>> {
        validate_rating(update.rating)?;

        let notes = trimmed_notes(update.notes.as_deref());
        let result = sqlx::query(
            r"
            UPDATE cooking_logs SET cooked_at = $1, rating = $2, notes = $3
            WHERE id = $4 AND user_id = $5
            ",
        )
        .bind(update.cooked_at.to_rfc3339())
        .bind(update.rating)
        .bind(&notes)
        .bind(log_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update cooking log: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(log_id).await
    }

    /// Delete a cooking log
    ///
    /// Owner-scoped: returns `false` when nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(&self, log_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cooking_logs WHERE id = $1 AND user_id = $2")
            .bind(log_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete cooking log: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a cooking log by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, log_id: Uuid) -> AppResult<Option<CookingLog>> {
        let row = sqlx::query(
            r"
            SELECT id, recipe_id, user_id, cooked_at, rating, notes
            FROM cooking_logs
            WHERE id = $1
            ",
        )
        .bind(log_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get cooking log: {e}")))?;

        row.map(|r| row_to_log(&r)).transpose()
    }

    /// List cooking logs for a recipe, most recent attempt first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_for_recipe(&self, recipe_id: Uuid) -> AppResult<Vec<CookingLog>> {
        let rows = sqlx::query(
            r"
            SELECT id, recipe_id, user_id, cooked_at, rating, notes
            FROM cooking_logs
            WHERE recipe_id = $1
            ORDER BY cooked_at DESC
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list cooking logs: {e}")))?;

        rows.iter().map(row_to_log).collect()
    }

    /// Average rating across a recipe's rated cooking logs
    ///
    /// Logs without a rating are excluded; `None` when no log is rated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn average_rating(&self, recipe_id: Uuid) -> AppResult<Option<f64>> {
        let average = sqlx::query_scalar(
            "SELECT AVG(rating) FROM cooking_logs WHERE recipe_id = $1 AND rating IS NOT NULL",
        )
        .bind(recipe_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to average ratings: {e}")))?;

        Ok(average)
    }
}

fn validate_rating(rating: Option<i64>) -> AppResult<()> {
    if let Some(value) = rating {
        if !CookingLog::is_valid_rating(value) {
            return Err(AppError::out_of_range("Rating must be between 1 and 5"));
        }
    }
    Ok(())
}

fn trimmed_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

/// Convert a database row to a `CookingLog` struct
fn row_to_log(row: &SqliteRow) -> AppResult<CookingLog> {
    let id_str: String = row.get("id");
    let recipe_id_str: String = row.get("recipe_id");
    let user_id_str: String = row.get("user_id");
    let cooked_at_str: String = row.get("cooked_at");

    Ok(CookingLog {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        recipe_id: Uuid::parse_str(&recipe_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        user_id: Uuid::parse_str(&user_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        cooked_at: DateTime::parse_from_rfc3339(&cooked_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
        rating: row.get("rating"),
        notes: row.get("notes"),
    })
}
