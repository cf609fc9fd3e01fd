// ABOUTME: Database management for the Savourly service
// ABOUTME: Owns the SQLite pool, runs migrations, and exposes domain managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! # Database Management
//!
//! SQLite storage for users, recipes, favorites, and cooking logs. Each
//! domain lives in its own module; schema creation happens through
//! `migrate_*` methods invoked from [`Database::migrate`].

pub mod cooking_logs;
pub mod favorites;
pub mod recipes;
mod users;

pub use cooking_logs::{CookingLogsManager, NewCookingLog, UpdateCookingLog};
pub use favorites::{FavoriteOutcome, FavoritesManager};
pub use recipes::{
    CreateRecipeRequest, DiscoverItem, IngredientInput, RecipeFilter, RecipesManager,
    UpdateRecipeRequest,
};

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for user and recipe storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        // Foreign keys are off by default in SQLite; child-row cascades
        // depend on them
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&self.pool)
            .await?;

        self.migrate_users().await?;
        self.migrate_recipes().await?;
        self.migrate_favorites().await?;
        self.migrate_cooking_logs().await?;

        Ok(())
    }

    /// Create recipe tables (recipes, ingredients, instructions, tags)
    async fn migrate_recipes(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                description TEXT,
                cuisine TEXT,
                difficulty TEXT NOT NULL DEFAULT 'medium' CHECK (difficulty IN ('easy', 'medium', 'hard')),
                prep_time_mins INTEGER,
                cook_time_mins INTEGER,
                servings INTEGER NOT NULL DEFAULT 4,
                image_url TEXT,
                is_public INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                amount REAL,
                unit TEXT,
                order_index INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS instructions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                step_number INTEGER NOT NULL,
                content TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_tags (
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                tag TEXT NOT NULL,
                UNIQUE(recipe_id, tag)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_user ON recipes(user_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_public ON recipes(is_public)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_ingredients_recipe ON ingredients(recipe_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_instructions_recipe ON instructions(recipe_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipe_tags_tag ON recipe_tags(tag)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create the favorites table
    async fn migrate_favorites(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS favorites (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, recipe_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorites(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create the cooking_logs table
    async fn migrate_cooking_logs(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cooking_logs (
                id TEXT PRIMARY KEY,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                cooked_at TEXT NOT NULL,
                rating INTEGER CHECK (rating >= 1 AND rating <= 5),
                notes TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_cooking_logs_recipe ON cooking_logs(recipe_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
