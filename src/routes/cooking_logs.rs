// ABOUTME: Route handlers for cooking logs with ratings and notes
// ABOUTME: Provides per-recipe log listing plus owner-scoped add/edit/delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Cooking-log routes
//!
//! Logs hang off a recipe the viewer can see (own or public). Editing and
//! deleting are scoped to the log's author.

use crate::{
    auth::{authenticate_optional, authenticate_request},
    database::{CookingLogsManager, NewCookingLog, RecipesManager, UpdateCookingLog},
    errors::{AppError, ErrorCode},
    i18n::{self, Locale, MessageKey},
    routes::recipes::{not_found_localized, parse_recipe_id, ResponseMetadata},
    server::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use savourly_core::models::CookingLog;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Response for a cooking log
#[derive(Debug, Serialize, Deserialize)]
pub struct CookingLogResponse {
    /// Unique identifier
    pub id: String,
    /// Recipe that was cooked
    pub recipe_id: String,
    /// User who cooked it
    pub user_id: String,
    /// When the recipe was cooked
    pub cooked_at: String,
    /// Optional star rating, 1 to 5
    pub rating: Option<i64>,
    /// Optional notes
    pub notes: Option<String>,
}

impl From<CookingLog> for CookingLogResponse {
    fn from(log: CookingLog) -> Self {
        Self {
            id: log.id.to_string(),
            recipe_id: log.recipe_id.to_string(),
            user_id: log.user_id.to_string(),
            cooked_at: log.cooked_at.to_rfc3339(),
            rating: log.rating,
            notes: log.notes,
        }
    }
}

/// Response for listing a recipe's cooking logs
#[derive(Debug, Serialize, Deserialize)]
pub struct ListCookingLogsResponse {
    /// Logs, most recent attempt first
    pub logs: Vec<CookingLogResponse>,
    /// Average rating across rated logs
    pub average_rating: Option<f64>,
    /// Response metadata
    pub metadata: ResponseMetadata,
}

/// Request body for recording a cooking attempt
#[derive(Debug, Deserialize)]
pub struct CreateCookingLogBody {
    /// When the recipe was cooked; defaults to now
    pub cooked_at: Option<DateTime<Utc>>,
    /// Optional star rating, 1 to 5
    pub rating: Option<i64>,
    /// Optional notes
    pub notes: Option<String>,
}

/// Request body for editing a cooking log
#[derive(Debug, Deserialize)]
pub struct UpdateCookingLogBody {
    /// New cooked-at timestamp
    pub cooked_at: DateTime<Utc>,
    /// New rating, 1 to 5
    pub rating: Option<i64>,
    /// New notes
    pub notes: Option<String>,
}

/// Cooking-log routes handler
pub struct CookingLogRoutes;

impl CookingLogRoutes {
    /// Create all cooking-log routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/:id/logs", get(Self::handle_list))
            .route("/api/recipes/:id/logs", post(Self::handle_create))
            .route("/api/logs/:id", put(Self::handle_update))
            .route("/api/logs/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    fn manager(resources: &Arc<ServerResources>) -> CookingLogsManager {
        CookingLogsManager::new(resources.database.pool().clone())
    }

    /// Check that the viewer may see the recipe (owner or public)
    async fn ensure_recipe_visible(
        resources: &Arc<ServerResources>,
        recipe_id: Uuid,
        viewer: Option<Uuid>,
        locale: Locale,
    ) -> Result<(), AppError> {
        let recipes = RecipesManager::new(resources.database.pool().clone());
        let recipe = recipes
            .get(recipe_id)
            .await?
            .ok_or_else(|| not_found_localized(locale))?;

        let is_owner = viewer.is_some_and(|id| id == recipe.user_id);
        if !recipe.is_public && !is_owner {
            return Err(not_found_localized(locale));
        }
        Ok(())
    }

    /// Handle GET /api/recipes/:id/logs - list a recipe's cooking logs
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let viewer = authenticate_optional(&headers, &resources).await?;
        let locale = Locale::from_headers(&headers);
        let recipe_id = parse_recipe_id(&id)?;

        Self::ensure_recipe_visible(
            &resources,
            recipe_id,
            viewer.map(|auth| auth.user_id),
            locale,
        )
        .await?;

        let manager = Self::manager(&resources);
        let logs = manager.list_for_recipe(recipe_id).await?;
        let average_rating = manager.average_rating(recipe_id).await?;

        let response = ListCookingLogsResponse {
            logs: logs.into_iter().map(Into::into).collect(),
            average_rating,
            metadata: ResponseMetadata::build(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/recipes/:id/logs - record a cooking attempt
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<CreateCookingLogBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let locale = Locale::from_headers(&headers);
        let recipe_id = parse_recipe_id(&id)?;

        Self::ensure_recipe_visible(&resources, recipe_id, Some(auth.user_id), locale).await?;

        if let Some(rating) = body.rating {
            if !CookingLog::is_valid_rating(rating) {
                return Err(AppError::new(
                    ErrorCode::ValueOutOfRange,
                    i18n::message(locale, MessageKey::InvalidRating),
                ));
            }
        }

        let manager = Self::manager(&resources);
        let log = manager
            .add(
                recipe_id,
                auth.user_id,
                &NewCookingLog {
                    cooked_at: body.cooked_at,
                    rating: body.rating,
                    notes: body.notes,
                },
            )
            .await?;

        let response: CookingLogResponse = log.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle PUT /api/logs/:id - edit an own cooking log
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateCookingLogBody>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let locale = Locale::from_headers(&headers);
        let log_id = parse_log_id(&id)?;

        if let Some(rating) = body.rating {
            if !CookingLog::is_valid_rating(rating) {
                return Err(AppError::new(
                    ErrorCode::ValueOutOfRange,
                    i18n::message(locale, MessageKey::InvalidRating),
                ));
            }
        }

        let manager = Self::manager(&resources);
        let log = manager
            .update(
                log_id,
                auth.user_id,
                &UpdateCookingLog {
                    cooked_at: body.cooked_at,
                    rating: body.rating,
                    notes: body.notes,
                },
            )
            .await?
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ResourceNotFound,
                    i18n::message(locale, MessageKey::LogNotFound),
                )
            })?;

        let response: CookingLogResponse = log.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/logs/:id - delete an own cooking log
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let locale = Locale::from_headers(&headers);
        let log_id = parse_log_id(&id)?;

        let manager = Self::manager(&resources);
        let deleted = manager.delete(log_id, auth.user_id).await?;

        if !deleted {
            return Err(AppError::new(
                ErrorCode::ResourceNotFound,
                i18n::message(locale, MessageKey::LogNotFound),
            ));
        }

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}

fn parse_log_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|e| AppError::invalid_input(format!("Invalid log id: {e}")))
}
