// ABOUTME: Route handlers for the discover feed of public recipes
// ABOUTME: Serves other users' public recipes plus tag and cuisine filter chips
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Discover feed routes
//!
//! The discover feed lists public recipes the viewer does not own,
//! optionally filtered by text query, tag, or difficulty. Anonymous viewers
//! are allowed; authenticated viewers get their bookmark state on each item.

use crate::{
    auth::authenticate_optional,
    database::RecipesManager,
    errors::AppError,
    routes::recipes::{ListRecipesQuery, RecipeResponse, ResponseMetadata},
    server::ServerResources,
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use savourly_core::models::Tag;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One entry of the discover feed
#[derive(Debug, Serialize, Deserialize)]
pub struct DiscoverItemResponse {
    /// The recipe data
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    /// Whether the viewer has bookmarked this recipe
    pub is_favorited: bool,
}

/// Response for the discover feed
#[derive(Debug, Serialize, Deserialize)]
pub struct DiscoverResponse {
    /// Matching public recipes
    pub recipes: Vec<DiscoverItemResponse>,
    /// Response metadata
    pub metadata: ResponseMetadata,
}

/// Response for the tag catalog
#[derive(Debug, Serialize, Deserialize)]
pub struct TagsResponse {
    /// Every tag in the catalog
    pub catalog: Vec<String>,
    /// Tags currently used by at least one recipe
    pub in_use: Vec<String>,
}

/// Response for the cuisine list
#[derive(Debug, Serialize, Deserialize)]
pub struct CuisinesResponse {
    /// Distinct cuisines across all recipes
    pub cuisines: Vec<String>,
}

/// Discover feed routes handler
pub struct DiscoverRoutes;

impl DiscoverRoutes {
    /// Create all discover routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/discover", get(Self::handle_discover))
            .route("/api/tags", get(Self::handle_tags))
            .route("/api/cuisines", get(Self::handle_cuisines))
            .with_state(resources)
    }

    /// Handle GET /api/discover - public recipes from other users
    async fn handle_discover(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListRecipesQuery>,
    ) -> Result<Response, AppError> {
        let viewer = authenticate_optional(&headers, &resources).await?;
        let manager = RecipesManager::new(resources.database.pool().clone());

        let filter = query.into_filter()?;
        let items = manager
            .list_discover(viewer.map(|auth| auth.user_id), &filter)
            .await?;

        let response = DiscoverResponse {
            recipes: items
                .into_iter()
                .map(|item| DiscoverItemResponse {
                    recipe: item.recipe.into(),
                    is_favorited: item.is_favorited,
                })
                .collect(),
            metadata: ResponseMetadata::build(),
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/tags - the tag catalog and tags in use
    async fn handle_tags(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let manager = RecipesManager::new(resources.database.pool().clone());
        let in_use = manager.distinct_tags().await?;

        let response = TagsResponse {
            catalog: Tag::ALL.iter().map(|tag| tag.as_str().to_owned()).collect(),
            in_use: in_use.iter().map(|tag| tag.as_str().to_owned()).collect(),
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/cuisines - distinct cuisines for filter chips
    async fn handle_cuisines(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let manager = RecipesManager::new(resources.database.pool().clone());
        let cuisines = manager.distinct_cuisines().await?;

        Ok((StatusCode::OK, Json(CuisinesResponse { cuisines })).into_response())
    }
}
