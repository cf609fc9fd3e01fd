// ABOUTME: Route handlers for the recipe CRUD REST API
// ABOUTME: Provides listing, creation, detail with serving scaler, update, and delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Recipe routes
//!
//! Owners manage their recipes through these endpoints; the detail endpoint
//! also serves public recipes to other (even anonymous) viewers and scales
//! ingredient amounts when `?servings=N` is given.

use crate::{
    auth::{authenticate_optional, authenticate_request},
    database::{CreateRecipeRequest, IngredientInput, RecipeFilter, RecipesManager,
        UpdateRecipeRequest},
    errors::{AppError, AppResult},
    i18n::{self, Locale, MessageKey},
    server::ServerResources,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use savourly_core::constants::limits;
use savourly_core::models::{scale_ingredients, Difficulty, Recipe, RecipeDetails, Tag};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Response for a recipe summary
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Unique identifier
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Recipe title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Free-text cuisine
    pub cuisine: Option<String>,
    /// Difficulty level
    pub difficulty: String,
    /// Preparation time in minutes
    pub prep_time_mins: Option<u16>,
    /// Cooking time in minutes
    pub cook_time_mins: Option<u16>,
    /// Total time (prep + cook) in minutes
    pub total_time_mins: Option<u16>,
    /// Number of servings
    pub servings: u16,
    /// Optional image URL
    pub image_url: Option<String>,
    /// Whether the recipe is public
    pub is_public: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        let total_time_mins = recipe.total_time_mins();
        Self {
            id: recipe.id.to_string(),
            user_id: recipe.user_id.to_string(),
            title: recipe.title,
            description: recipe.description,
            cuisine: recipe.cuisine,
            difficulty: recipe.difficulty.as_str().to_owned(),
            prep_time_mins: recipe.prep_time_mins,
            cook_time_mins: recipe.cook_time_mins,
            total_time_mins,
            servings: recipe.servings,
            image_url: recipe.image_url,
            is_public: recipe.is_public,
            created_at: recipe.created_at.to_rfc3339(),
            updated_at: recipe.updated_at.to_rfc3339(),
        }
    }
}

/// One ingredient line in a detail response
#[derive(Debug, Serialize, Deserialize)]
pub struct IngredientResponse {
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub order_index: u32,
}

/// One instruction step in a detail response
#[derive(Debug, Serialize, Deserialize)]
pub struct InstructionResponse {
    pub step_number: u32,
    pub content: String,
}

/// Full recipe detail with children and rating summary
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeDetailResponse {
    /// The recipe fields
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    /// Ingredients, scaled when `?servings=N` was requested
    pub ingredients: Vec<IngredientResponse>,
    /// Instruction steps in order
    pub instructions: Vec<InstructionResponse>,
    /// Tags from the fixed catalog
    pub tags: Vec<String>,
    /// Average rating across rated cooking logs
    pub average_rating: Option<f64>,
}

/// Response for listing recipes
#[derive(Debug, Serialize, Deserialize)]
pub struct ListRecipesResponse {
    /// Matching recipes
    pub recipes: Vec<RecipeResponse>,
    /// Total recipes owned by the user (ignores filters)
    pub total: u32,
    /// Response metadata
    pub metadata: ResponseMetadata,
}

/// Metadata attached to list responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Response timestamp
    pub timestamp: String,
    /// API version
    pub api_version: String,
}

impl ResponseMetadata {
    pub(crate) fn build() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            api_version: "1.0".to_owned(),
        }
    }
}

/// Query parameters for listing recipes
#[derive(Debug, Deserialize, Default)]
pub struct ListRecipesQuery {
    /// Text query against title and description
    pub q: Option<String>,
    /// Filter by cuisine
    pub cuisine: Option<String>,
    /// Filter by tag
    pub tag: Option<String>,
    /// Filter by difficulty
    pub difficulty: Option<String>,
    /// Maximum results to return
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl ListRecipesQuery {
    /// Convert query parameters into a storage filter
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for tags outside the catalog or unknown
    /// difficulty values.
    pub fn into_filter(self) -> AppResult<RecipeFilter> {
        let tag = self
            .tag
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<Tag>()
                    .map_err(|e| AppError::invalid_input(e.to_string()))
            })
            .transpose()?;

        let difficulty = self
            .difficulty
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(parse_difficulty_param)
            .transpose()?;

        Ok(RecipeFilter {
            query: self.q,
            cuisine: self.cuisine,
            tag,
            difficulty,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Query parameters for the recipe detail endpoint
#[derive(Debug, Deserialize, Default)]
pub struct RecipeDetailQuery {
    /// Scale ingredient amounts to this serving count
    pub servings: Option<u16>,
}

/// Request body for creating or updating a recipe
#[derive(Debug, Deserialize)]
pub struct RecipeBody {
    pub title: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
    pub prep_time_mins: Option<u16>,
    pub cook_time_mins: Option<u16>,
    pub servings: Option<u16>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub ingredients: Vec<IngredientBody>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One ingredient line in a request body
#[derive(Debug, Deserialize)]
pub struct IngredientBody {
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

impl RecipeBody {
    /// Validate the payload and surface locale-aware messages
    fn validate(&self, locale: Locale) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::invalid_input(i18n::message(
                locale,
                MessageKey::TitleRequired,
            )));
        }
        if self.title.trim().len() > limits::MAX_TITLE_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Title must be at most {} characters",
                limits::MAX_TITLE_LENGTH
            )));
        }
        if !self
            .ingredients
            .iter()
            .any(|ingredient| !ingredient.name.trim().is_empty())
        {
            return Err(AppError::invalid_input(i18n::message(
                locale,
                MessageKey::IngredientRequired,
            )));
        }
        if !self.instructions.iter().any(|step| !step.trim().is_empty()) {
            return Err(AppError::invalid_input(i18n::message(
                locale,
                MessageKey::InstructionRequired,
            )));
        }
        if let Some(servings) = self.servings {
            if servings == 0 || servings > limits::MAX_SERVINGS {
                return Err(AppError::out_of_range(format!(
                    "Servings must be between 1 and {}",
                    limits::MAX_SERVINGS
                )));
            }
        }
        Ok(())
    }

    fn difficulty(&self) -> AppResult<Difficulty> {
        self.difficulty
            .as_deref()
            .filter(|d| !d.is_empty())
            .map_or(Ok(Difficulty::default()), parse_difficulty_param)
    }

    fn tags(&self) -> AppResult<Vec<Tag>> {
        self.tags
            .iter()
            .map(|tag| {
                tag.parse::<Tag>()
                    .map_err(|e| AppError::invalid_input(e.to_string()))
            })
            .collect()
    }

    fn ingredients(&self) -> Vec<IngredientInput> {
        self.ingredients
            .iter()
            .map(|ingredient| IngredientInput {
                name: ingredient.name.clone(),
                amount: ingredient.amount,
                unit: ingredient.unit.clone(),
            })
            .collect()
    }

    fn into_create_request(self) -> AppResult<CreateRecipeRequest> {
        Ok(CreateRecipeRequest {
            difficulty: self.difficulty()?,
            tags: self.tags()?,
            ingredients: self.ingredients(),
            title: self.title,
            description: self.description,
            cuisine: self.cuisine,
            prep_time_mins: self.prep_time_mins,
            cook_time_mins: self.cook_time_mins,
            servings: self.servings,
            image_url: self.image_url,
            is_public: self.is_public,
            instructions: self.instructions,
        })
    }

    fn into_update_request(self) -> AppResult<UpdateRecipeRequest> {
        Ok(UpdateRecipeRequest {
            difficulty: self.difficulty()?,
            tags: self.tags()?,
            ingredients: self.ingredients(),
            title: self.title,
            description: self.description,
            cuisine: self.cuisine,
            prep_time_mins: self.prep_time_mins,
            cook_time_mins: self.cook_time_mins,
            servings: self.servings,
            image_url: self.image_url,
            is_public: self.is_public,
            instructions: self.instructions,
        })
    }
}

fn parse_difficulty_param(value: &str) -> AppResult<Difficulty> {
    match value {
        "easy" => Ok(Difficulty::Easy),
        "medium" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        other => Err(AppError::invalid_input(format!(
            "Unknown difficulty: {other}"
        ))),
    }
}

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes", get(Self::handle_list))
            .route("/api/recipes", post(Self::handle_create))
            .route("/api/recipes/:id", get(Self::handle_get))
            .route("/api/recipes/:id", put(Self::handle_update))
            .route("/api/recipes/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    fn manager(resources: &Arc<ServerResources>) -> RecipesManager {
        RecipesManager::new(resources.database.pool().clone())
    }

    /// Build a detail response, scaling ingredients when requested
    pub(crate) async fn detail_response(
        resources: &Arc<ServerResources>,
        details: RecipeDetails,
        target_servings: Option<u16>,
    ) -> AppResult<RecipeDetailResponse> {
        let logs = crate::database::CookingLogsManager::new(resources.database.pool().clone());
        let average_rating = logs.average_rating(details.recipe.id).await?;

        let base_servings = details.recipe.servings;
        let (servings, ingredients) = match target_servings {
            Some(target) => {
                if target == 0 || target > limits::MAX_SERVINGS {
                    return Err(AppError::out_of_range(format!(
                        "Servings must be between 1 and {}",
                        limits::MAX_SERVINGS
                    )));
                }
                (
                    target,
                    scale_ingredients(&details.ingredients, base_servings, target),
                )
            }
            None => (base_servings, details.ingredients),
        };

        let mut recipe: RecipeResponse = details.recipe.into();
        recipe.servings = servings;

        Ok(RecipeDetailResponse {
            recipe,
            ingredients: ingredients
                .into_iter()
                .map(|ingredient| IngredientResponse {
                    name: ingredient.name,
                    amount: ingredient.amount,
                    unit: ingredient.unit,
                    order_index: ingredient.order_index,
                })
                .collect(),
            instructions: details
                .instructions
                .into_iter()
                .map(|instruction| InstructionResponse {
                    step_number: instruction.step_number,
                    content: instruction.content,
                })
                .collect(),
            tags: details
                .tags
                .into_iter()
                .map(|tag| tag.as_str().to_owned())
                .collect(),
            average_rating,
        })
    }

    /// Handle GET /api/recipes - list the authenticated user's recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListRecipesQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let manager = Self::manager(&resources);

        let filter = query.into_filter()?;
        let recipes = manager.list_mine(auth.user_id, &filter).await?;
        let total = manager.count_mine(auth.user_id).await?;

        let response = ListRecipesResponse {
            recipes: recipes.into_iter().map(Into::into).collect(),
            total,
            metadata: ResponseMetadata::build(),
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/recipes - create a new recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<RecipeBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let locale = Locale::from_headers(&headers);
        body.validate(locale)?;

        let manager = Self::manager(&resources);
        let request = body.into_create_request()?;
        let details = manager.create(auth.user_id, &request).await?;

        tracing::info!(
            "Recipe created: {} by user {}",
            details.recipe.id,
            auth.user_id
        );

        let response = Self::detail_response(&resources, details, None).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/recipes/:id - recipe detail with optional scaling
    ///
    /// Owners see their private recipes; everyone else (including anonymous
    /// viewers) only sees public ones.
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Query(query): Query<RecipeDetailQuery>,
    ) -> Result<Response, AppError> {
        let viewer = authenticate_optional(&headers, &resources).await?;
        let locale = Locale::from_headers(&headers);
        let recipe_id = parse_recipe_id(&id)?;

        let manager = Self::manager(&resources);
        let details = manager
            .get_details(recipe_id)
            .await?
            .ok_or_else(|| not_found_localized(locale))?;

        let is_owner = viewer
            .as_ref()
            .is_some_and(|auth| auth.user_id == details.recipe.user_id);
        if !details.recipe.is_public && !is_owner {
            // Private recipes are indistinguishable from missing ones
            return Err(not_found_localized(locale));
        }

        let response = Self::detail_response(&resources, details, query.servings).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/recipes/:id - update an owned recipe
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<RecipeBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let locale = Locale::from_headers(&headers);
        let recipe_id = parse_recipe_id(&id)?;
        body.validate(locale)?;

        let manager = Self::manager(&resources);
        let request = body.into_update_request()?;
        let details = manager
            .update(recipe_id, auth.user_id, &request)
            .await?
            .ok_or_else(|| not_found_localized(locale))?;

        let response = Self::detail_response(&resources, details, None).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id - delete an owned recipe
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let locale = Locale::from_headers(&headers);
        let recipe_id = parse_recipe_id(&id)?;

        let manager = Self::manager(&resources);
        let deleted = manager.delete(recipe_id, auth.user_id).await?;

        if !deleted {
            return Err(not_found_localized(locale));
        }

        tracing::info!("Recipe deleted: {} by user {}", recipe_id, auth.user_id);
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}

/// Parse a recipe id path segment
pub(crate) fn parse_recipe_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|e| AppError::invalid_input(format!("Invalid recipe id: {e}")))
}

/// A localized recipe-not-found error
pub(crate) fn not_found_localized(locale: Locale) -> AppError {
    AppError::new(
        crate::errors::ErrorCode::ResourceNotFound,
        i18n::message(locale, MessageKey::RecipeNotFound),
    )
}
