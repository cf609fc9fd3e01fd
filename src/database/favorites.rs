// ABOUTME: Database operations for bookmarking other users' public recipes
// ABOUTME: Enforces the self-bookmark guard and public-only favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

use crate::errors::{AppError, AppResult};
use chrono::Utc;
use savourly_core::models::Recipe;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Outcome of a favorite request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    /// The bookmark now exists (newly added or already present)
    Favorited,
    /// The user tried to bookmark their own recipe; ignored
    OwnRecipe,
}

/// Favorites database operations manager
pub struct FavoritesManager {
    pool: SqlitePool,
}

impl FavoritesManager {
    /// Create a new favorites manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Bookmark a recipe for a user
    ///
    /// Only public recipes owned by someone else can be bookmarked.
    /// Bookmarking your own recipe is silently ignored; bookmarking twice
    /// is idempotent.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the recipe does not exist,
    /// `InvalidInput` when it is private, or a database error.
    pub async fn add(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<FavoriteOutcome> {
        let row = sqlx::query("SELECT user_id, is_public FROM recipes WHERE id = $1")
            .bind(recipe_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        let owner: String = row.get("user_id");
        let is_public: i64 = row.get("is_public");

        // Guard against self-bookmarking
        if owner == user_id.to_string() {
            return Ok(FavoriteOutcome::OwnRecipe);
        }

        if is_public != 1 {
            return Err(AppError::invalid_input(
                "Only public recipes can be bookmarked",
            ));
        }

        sqlx::query(
            r"
            INSERT OR IGNORE INTO favorites (user_id, recipe_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id.to_string())
        .bind(recipe_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add favorite: {e}")))?;

        Ok(FavoriteOutcome::Favorited)
    }

    /// Remove a bookmark
    ///
    /// Returns `false` when there was nothing to remove.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn remove(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id.to_string())
            .bind(recipe_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove favorite: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a user has bookmarked a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn is_favorited(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id.to_string())
            .bind(recipe_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check favorite: {e}")))?;

        Ok(row.is_some())
    }

    /// List the recipes a user has bookmarked, newest bookmark first
    ///
    /// Recipes made private after being bookmarked drop out of the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            r"
            SELECT r.id, r.user_id, r.title, r.description, r.cuisine, r.difficulty,
                   r.prep_time_mins, r.cook_time_mins, r.servings, r.image_url, r.is_public,
                   r.created_at, r.updated_at
            FROM recipes r
            INNER JOIN favorites f ON f.recipe_id = r.id
            WHERE f.user_id = $1 AND r.is_public = 1
            ORDER BY f.created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list favorites: {e}")))?;

        rows.iter().map(super::recipes::row_to_recipe).collect()
    }
}
