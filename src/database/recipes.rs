// ABOUTME: Database operations for user-owned recipes with ingredients and tags
// ABOUTME: Handles transactional create/update, owner-scoped writes, and filtered listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use savourly_core::constants::limits;
use savourly_core::models::{Difficulty, Ingredient, Instruction, Recipe, RecipeDetails, Tag};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

/// One ingredient line as submitted by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientInput {
    /// Ingredient name
    pub name: String,
    /// Amount in the given unit, if measurable
    pub amount: Option<f64>,
    /// Free-text unit
    pub unit: Option<String>,
}

/// Request to create a new recipe
///
/// Ingredient and instruction lines with blank text are dropped, matching
/// the form behavior where empty rows are left behind by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    /// Recipe title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Free-text cuisine
    pub cuisine: Option<String>,
    /// Difficulty level
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Preparation time in minutes
    pub prep_time_mins: Option<u16>,
    /// Cooking time in minutes
    pub cook_time_mins: Option<u16>,
    /// Number of servings; defaults to 4
    pub servings: Option<u16>,
    /// Optional image URL
    pub image_url: Option<String>,
    /// Whether the recipe appears in the discover feed
    #[serde(default)]
    pub is_public: bool,
    /// Ingredient lines in form order
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    /// Instruction steps in order
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Tags from the fixed catalog
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Request to update an existing recipe
///
/// Updates replace the whole recipe: the row is rewritten and all child
/// rows (ingredients, instructions, tags) are deleted and reinserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecipeRequest {
    /// New title
    pub title: String,
    /// New description
    pub description: Option<String>,
    /// New cuisine
    pub cuisine: Option<String>,
    /// New difficulty
    #[serde(default)]
    pub difficulty: Difficulty,
    /// New preparation time
    pub prep_time_mins: Option<u16>,
    /// New cooking time
    pub cook_time_mins: Option<u16>,
    /// New serving count; defaults to 4
    pub servings: Option<u16>,
    /// New image URL
    pub image_url: Option<String>,
    /// New visibility
    #[serde(default)]
    pub is_public: bool,
    /// Replacement ingredient lines
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    /// Replacement instruction steps
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Replacement tags
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Filter options for recipe listings
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Text query matched against title and description
    pub query: Option<String>,
    /// Filter by cuisine (exact match)
    pub cuisine: Option<String>,
    /// Filter by tag
    pub tag: Option<Tag>,
    /// Filter by difficulty
    pub difficulty: Option<Difficulty>,
    /// Maximum number of results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

/// A public recipe annotated with the viewer's bookmark state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverItem {
    /// The recipe data
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Whether the current viewer has bookmarked this recipe
    pub is_favorited: bool,
}

/// Recipe database operations manager
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new recipe with its ingredients, instructions, and tags
    ///
    /// The recipe row and all child rows are written in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn create(
        &self,
        user_id: Uuid,
        request: &CreateRecipeRequest,
    ) -> AppResult<RecipeDetails> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let servings = request.servings.unwrap_or(limits::DEFAULT_SERVINGS);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO recipes (
                id, user_id, title, description, cuisine, difficulty,
                prep_time_mins, cook_time_mins, servings, image_url, is_public,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(request.title.trim())
        .bind(trimmed_or_none(request.description.as_deref()))
        .bind(trimmed_or_none(request.cuisine.as_deref()))
        .bind(request.difficulty.as_str())
        .bind(request.prep_time_mins.map(i64::from))
        .bind(request.cook_time_mins.map(i64::from))
        .bind(i64::from(servings))
        .bind(trimmed_or_none(request.image_url.as_deref()))
        .bind(request.is_public)
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        insert_children(
            &mut tx,
            &id.to_string(),
            &request.ingredients,
            &request.instructions,
            &request.tags,
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        self.get_details(id)
            .await?
            .ok_or_else(|| AppError::internal("Recipe vanished after create"))
    }

    /// Get a recipe row by ID
    ///
    /// Visibility is the caller's concern: private recipes are returned and
    /// must only be exposed to their owner.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn get(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, title, description, cuisine, difficulty,
                   prep_time_mins, cook_time_mins, servings, image_url, is_public,
                   created_at, updated_at
            FROM recipes
            WHERE id = $1
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.map(|r| row_to_recipe(&r)).transpose()
    }

    /// Get a recipe with its ordered ingredients, instructions, and tags
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn get_details(&self, recipe_id: Uuid) -> AppResult<Option<RecipeDetails>> {
        let Some(recipe) = self.get(recipe_id).await? else {
            return Ok(None);
        };

        let id_str = recipe_id.to_string();

        let ingredient_rows = sqlx::query(
            r"
            SELECT name, amount, unit, order_index
            FROM ingredients
            WHERE recipe_id = $1
            ORDER BY order_index ASC
            ",
        )
        .bind(&id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get ingredients: {e}")))?;

        let ingredients = ingredient_rows
            .iter()
            .map(|row| {
                let order_index: i64 = row.get("order_index");
                Ingredient {
                    name: row.get("name"),
                    amount: row.get("amount"),
                    unit: row.get("unit"),
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    order_index: order_index as u32,
                }
            })
            .collect();

        let instruction_rows = sqlx::query(
            r"
            SELECT step_number, content
            FROM instructions
            WHERE recipe_id = $1
            ORDER BY step_number ASC
            ",
        )
        .bind(&id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get instructions: {e}")))?;

        let instructions = instruction_rows
            .iter()
            .map(|row| {
                let step_number: i64 = row.get("step_number");
                Instruction {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    step_number: step_number as u32,
                    content: row.get("content"),
                }
            })
            .collect();

        let tag_rows = sqlx::query(
            "SELECT tag FROM recipe_tags WHERE recipe_id = $1 ORDER BY tag ASC",
        )
        .bind(&id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get tags: {e}")))?;

        let tags = tag_rows
            .iter()
            .filter_map(|row| row.get::<String, _>("tag").parse::<Tag>().ok())
            .collect();

        Ok(Some(RecipeDetails {
            recipe,
            ingredients,
            instructions,
            tags,
        }))
    }

    /// Update a recipe, replacing all child rows
    ///
    /// Owner-scoped: returns `None` when the recipe does not exist or is
    /// not owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn update(
        &self,
        recipe_id: Uuid,
        user_id: Uuid,
        request: &UpdateRecipeRequest,
    ) -> AppResult<Option<RecipeDetails>> {
        let now = Utc::now();
        let servings = request.servings.unwrap_or(limits::DEFAULT_SERVINGS);
        let id_str = recipe_id.to_string();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let result = sqlx::query(
            r"
            UPDATE recipes SET
                title = $1, description = $2, cuisine = $3, difficulty = $4,
                prep_time_mins = $5, cook_time_mins = $6, servings = $7,
                image_url = $8, is_public = $9, updated_at = $10
            WHERE id = $11 AND user_id = $12
            ",
        )
        .bind(request.title.trim())
        .bind(trimmed_or_none(request.description.as_deref()))
        .bind(trimmed_or_none(request.cuisine.as_deref()))
        .bind(request.difficulty.as_str())
        .bind(request.prep_time_mins.map(i64::from))
        .bind(request.cook_time_mins.map(i64::from))
        .bind(i64::from(servings))
        .bind(trimmed_or_none(request.image_url.as_deref()))
        .bind(request.is_public)
        .bind(now.to_rfc3339())
        .bind(&id_str)
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        // Replace strategy: drop and reinsert all child rows
        for table in ["ingredients", "instructions", "recipe_tags"] {
            let delete = format!("DELETE FROM {table} WHERE recipe_id = $1");
            sqlx::query(&delete)
                .bind(&id_str)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to clear {table}: {e}")))?;
        }

        insert_children(
            &mut tx,
            &id_str,
            &request.ingredients,
            &request.instructions,
            &request.tags,
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit update: {e}")))?;

        self.get_details(recipe_id).await
    }

    /// Delete a recipe and, via cascade, its children, favorites, and logs
    ///
    /// Owner-scoped: returns `false` when nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn delete(&self, recipe_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(recipe_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// List the user's own recipes, newest first, with optional filters
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn list_mine(&self, user_id: Uuid, filter: &RecipeFilter) -> AppResult<Vec<Recipe>> {
        let mut sql = String::from(
            r"
            SELECT id, user_id, title, description, cuisine, difficulty,
                   prep_time_mins, cook_time_mins, servings, image_url, is_public,
                   created_at, updated_at
            FROM recipes
            WHERE user_id = ?
            ",
        );
        let mut text_binds: Vec<String> = Vec::new();

        push_filter_clauses(&mut sql, &mut text_binds, filter);
        sql.push_str(" ORDER BY created_at DESC LIMIT ? OFFSET ?");

        let mut query = sqlx::query(&sql).bind(user_id.to_string());
        for value in &text_binds {
            query = query.bind(value);
        }
        query = query.bind(page_limit(filter)).bind(page_offset(filter));

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// List public recipes from other users, annotated with the viewer's
    /// bookmark state
    ///
    /// Anonymous viewers see all public recipes with `is_favorited` false.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn list_discover(
        &self,
        viewer: Option<Uuid>,
        filter: &RecipeFilter,
    ) -> AppResult<Vec<DiscoverItem>> {
        // An empty viewer id matches no rows, so the LEFT JOIN and the
        // ownership exclusion both degrade correctly for anonymous viewers
        let viewer_str = viewer.map(|id| id.to_string()).unwrap_or_default();

        let mut sql = String::from(
            r"
            SELECT r.id, r.user_id, r.title, r.description, r.cuisine, r.difficulty,
                   r.prep_time_mins, r.cook_time_mins, r.servings, r.image_url, r.is_public,
                   r.created_at, r.updated_at,
                   CASE WHEN f.recipe_id IS NOT NULL THEN 1 ELSE 0 END AS is_favorited
            FROM recipes r
            LEFT JOIN favorites f ON f.recipe_id = r.id AND f.user_id = ?
            WHERE r.is_public = 1 AND r.user_id != ?
            ",
        );
        let mut text_binds: Vec<String> = Vec::new();

        push_filter_clauses(&mut sql, &mut text_binds, filter);
        sql.push_str(" ORDER BY r.created_at DESC LIMIT ? OFFSET ?");

        let mut query = sqlx::query(&sql).bind(&viewer_str).bind(&viewer_str);
        for value in &text_binds {
            query = query.bind(value);
        }
        query = query.bind(page_limit(filter)).bind(page_offset(filter));

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list discover feed: {e}")))?;

        rows.iter()
            .map(|row| {
                let recipe = row_to_recipe(row)?;
                let is_favorited: i64 = row.get("is_favorited");
                Ok(DiscoverItem {
                    recipe,
                    is_favorited: is_favorited == 1,
                })
            })
            .collect()
    }

    /// Count recipes owned by a user
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn count_mine(&self, user_id: Uuid) -> AppResult<u32> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(count as u32)
    }

    /// Distinct cuisines across all recipes, for filter chips
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn distinct_cuisines(&self) -> AppResult<Vec<String>> {
        let cuisines = sqlx::query_scalar(
            "SELECT DISTINCT cuisine FROM recipes WHERE cuisine IS NOT NULL ORDER BY cuisine ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list cuisines: {e}")))?;

        Ok(cuisines)
    }

    /// Distinct tags in use across all recipes, for filter chips
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn distinct_tags(&self) -> AppResult<Vec<Tag>> {
        let tags: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT tag FROM recipe_tags ORDER BY tag ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to list tags: {e}")))?;

        Ok(tags
            .iter()
            .filter_map(|tag| tag.parse::<Tag>().ok())
            .collect())
    }
}

/// Append filter clauses shared by the own-recipes and discover listings
///
/// Text filters (query, cuisine) go through bind parameters; difficulty and
/// tag come from closed enums and are formatted inline.
fn push_filter_clauses(sql: &mut String, text_binds: &mut Vec<String>, filter: &RecipeFilter) {
    if let Some(query) = filter.query.as_deref().filter(|q| !q.trim().is_empty()) {
        sql.push_str(" AND (title LIKE ? OR description LIKE ?)");
        let pattern = format!("%{}%", query.trim());
        text_binds.push(pattern.clone());
        text_binds.push(pattern);
    }

    if let Some(cuisine) = filter.cuisine.as_deref().filter(|c| !c.trim().is_empty()) {
        sql.push_str(" AND cuisine = ?");
        text_binds.push(cuisine.trim().to_owned());
    }

    if let Some(difficulty) = filter.difficulty {
        sql.push_str(&format!(" AND difficulty = '{}'", difficulty.as_str()));
    }

    if let Some(tag) = filter.tag {
        sql.push_str(&format!(
            " AND id IN (SELECT recipe_id FROM recipe_tags WHERE tag = '{}')",
            tag.as_str()
        ));
    }
}

fn page_limit(filter: &RecipeFilter) -> i64 {
    i64::from(
        filter
            .limit
            .unwrap_or(limits::DEFAULT_PAGE_SIZE)
            .min(limits::MAX_PAGE_SIZE),
    )
}

fn page_offset(filter: &RecipeFilter) -> i64 {
    i64::from(filter.offset.unwrap_or(0))
}

/// Insert ingredient, instruction, and tag rows for a recipe
///
/// Blank lines are skipped; surviving rows get dense order indexes and
/// 1-based step numbers.
async fn insert_children(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: &str,
    ingredients: &[IngredientInput],
    instructions: &[String],
    tags: &[Tag],
) -> AppResult<()> {
    let mut order_index = 0i64;
    for ingredient in ingredients {
        let name = ingredient.name.trim();
        if name.is_empty() {
            continue;
        }
        sqlx::query(
            r"
            INSERT INTO ingredients (recipe_id, name, amount, unit, order_index)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(recipe_id)
        .bind(name)
        .bind(ingredient.amount)
        .bind(trimmed_or_none(ingredient.unit.as_deref()))
        .bind(order_index)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert ingredient: {e}")))?;
        order_index += 1;
    }

    let mut step_number = 1i64;
    for instruction in instructions {
        let content = instruction.trim();
        if content.is_empty() {
            continue;
        }
        sqlx::query(
            r"
            INSERT INTO instructions (recipe_id, step_number, content)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(recipe_id)
        .bind(step_number)
        .bind(content)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert instruction: {e}")))?;
        step_number += 1;
    }

    for tag in tags {
        sqlx::query("INSERT OR IGNORE INTO recipe_tags (recipe_id, tag) VALUES ($1, $2)")
            .bind(recipe_id)
            .bind(tag.as_str())
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert tag: {e}")))?;
    }

    Ok(())
}

fn trimmed_or_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

/// Convert a database row to a Recipe struct
pub(super) fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let difficulty_str: String = row.get("difficulty");
    let prep_time: Option<i64> = row.get("prep_time_mins");
    let cook_time: Option<i64> = row.get("cook_time_mins");
    let servings: i64 = row.get("servings");
    let is_public: i64 = row.get("is_public");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    Ok(Recipe {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        user_id: Uuid::parse_str(&user_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        title: row.get("title"),
        description: row.get("description"),
        cuisine: row.get("cuisine"),
        difficulty: Difficulty::parse(&difficulty_str),
        prep_time_mins: prep_time.and_then(|v| u16::try_from(v).ok()),
        cook_time_mins: cook_time.and_then(|v| u16::try_from(v).ok()),
        servings: u16::try_from(servings).unwrap_or(limits::DEFAULT_SERVINGS),
        image_url: row.get("image_url"),
        is_public: is_public == 1,
        created_at: parse_timestamp(&created_at_str)?,
        updated_at: parse_timestamp(&updated_at_str)?,
    })
}

fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))
}
