// ABOUTME: Route handlers for bookmarking other users' public recipes
// ABOUTME: Provides favorite add/remove endpoints and the bookmark list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Favorite (bookmark) routes
//!
//! All favorite endpoints require authentication. Bookmarking your own
//! recipe is a no-op, matching the web client's guard.

use crate::{
    auth::authenticate_request,
    database::{FavoriteOutcome, FavoritesManager},
    errors::AppError,
    routes::recipes::{parse_recipe_id, RecipeResponse, ResponseMetadata},
    server::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response for favorite add/remove operations
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteResponse {
    /// Whether the recipe is now bookmarked by the user
    pub is_favorited: bool,
}

/// Response for the bookmark list
#[derive(Debug, Serialize, Deserialize)]
pub struct ListFavoritesResponse {
    /// Bookmarked recipes, newest bookmark first
    pub recipes: Vec<RecipeResponse>,
    /// Response metadata
    pub metadata: ResponseMetadata,
}

/// Favorite routes handler
pub struct FavoriteRoutes;

impl FavoriteRoutes {
    /// Create all favorite routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/:id/favorite", post(Self::handle_add))
            .route("/api/recipes/:id/favorite", delete(Self::handle_remove))
            .route("/api/favorites", get(Self::handle_list))
            .with_state(resources)
    }

    fn manager(resources: &Arc<ServerResources>) -> FavoritesManager {
        FavoritesManager::new(resources.database.pool().clone())
    }

    /// Handle POST /api/recipes/:id/favorite - bookmark a recipe
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let recipe_id = parse_recipe_id(&id)?;

        let manager = Self::manager(&resources);
        let outcome = manager.add(auth.user_id, recipe_id).await?;

        let response = FavoriteResponse {
            is_favorited: outcome == FavoriteOutcome::Favorited,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/favorite - remove a bookmark
    async fn handle_remove(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let recipe_id = parse_recipe_id(&id)?;

        let manager = Self::manager(&resources);
        manager.remove(auth.user_id, recipe_id).await?;

        let response = FavoriteResponse {
            is_favorited: false,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/favorites - the viewer's bookmarked recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;

        let manager = Self::manager(&resources);
        let recipes = manager.list_for_user(auth.user_id).await?;

        let response = ListFavoritesResponse {
            recipes: recipes.into_iter().map(Into::into).collect(),
            metadata: ResponseMetadata::build(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
