// ABOUTME: Integration tests for recipe bookmarking
// ABOUTME: Covers the self-bookmark guard, public-only rule, and idempotency
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Tests for the favorites manager:
//! - Self-bookmarks are silently ignored
//! - Private recipes cannot be bookmarked
//! - Adding twice is idempotent; removal works

mod common;

use savourly::database::{FavoriteOutcome, FavoritesManager, RecipesManager};
use savourly::errors::ErrorCode;
use uuid::Uuid;

#[tokio::test]
async fn test_add_and_remove_favorite() {
    let db = common::create_test_database().await.unwrap();
    let (alice, _) = common::create_test_user(&db).await.unwrap();
    let (bruno, _) = common::create_test_user_with_email(&db, "bruno@example.com")
        .await
        .unwrap();
    let recipes = RecipesManager::new(db.pool().clone());
    let favorites = FavoritesManager::new(db.pool().clone());

    let recipe = recipes
        .create(alice, &common::sample_recipe_request("Shared", true))
        .await
        .unwrap();

    let outcome = favorites.add(bruno, recipe.recipe.id).await.unwrap();
    assert_eq!(outcome, FavoriteOutcome::Favorited);
    assert!(favorites.is_favorited(bruno, recipe.recipe.id).await.unwrap());

    let list = favorites.list_for_user(bruno).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "Shared");

    assert!(favorites.remove(bruno, recipe.recipe.id).await.unwrap());
    assert!(!favorites.is_favorited(bruno, recipe.recipe.id).await.unwrap());
    assert!(!favorites.remove(bruno, recipe.recipe.id).await.unwrap());
}

#[tokio::test]
async fn test_self_bookmark_is_ignored() {
    let db = common::create_test_database().await.unwrap();
    let (alice, _) = common::create_test_user(&db).await.unwrap();
    let recipes = RecipesManager::new(db.pool().clone());
    let favorites = FavoritesManager::new(db.pool().clone());

    let recipe = recipes
        .create(alice, &common::sample_recipe_request("Own", true))
        .await
        .unwrap();

    let outcome = favorites.add(alice, recipe.recipe.id).await.unwrap();
    assert_eq!(outcome, FavoriteOutcome::OwnRecipe);
    assert!(!favorites.is_favorited(alice, recipe.recipe.id).await.unwrap());
}

#[tokio::test]
async fn test_private_recipe_cannot_be_bookmarked() {
    let db = common::create_test_database().await.unwrap();
    let (alice, _) = common::create_test_user(&db).await.unwrap();
    let (bruno, _) = common::create_test_user_with_email(&db, "bruno@example.com")
        .await
        .unwrap();
    let recipes = RecipesManager::new(db.pool().clone());
    let favorites = FavoritesManager::new(db.pool().clone());

    let recipe = recipes
        .create(alice, &common::sample_recipe_request("Secret", false))
        .await
        .unwrap();

    let error = favorites.add(bruno, recipe.recipe.id).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_bookmark_missing_recipe() {
    let db = common::create_test_database().await.unwrap();
    let (bruno, _) = common::create_test_user_with_email(&db, "bruno@example.com")
        .await
        .unwrap();
    let favorites = FavoritesManager::new(db.pool().clone());

    let error = favorites.add(bruno, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_double_bookmark_is_idempotent() {
    let db = common::create_test_database().await.unwrap();
    let (alice, _) = common::create_test_user(&db).await.unwrap();
    let (bruno, _) = common::create_test_user_with_email(&db, "bruno@example.com")
        .await
        .unwrap();
    let recipes = RecipesManager::new(db.pool().clone());
    let favorites = FavoritesManager::new(db.pool().clone());

    let recipe = recipes
        .create(alice, &common::sample_recipe_request("Popular", true))
        .await
        .unwrap();

    favorites.add(bruno, recipe.recipe.id).await.unwrap();
    favorites.add(bruno, recipe.recipe.id).await.unwrap();

    let list = favorites.list_for_user(bruno).await.unwrap();
    assert_eq!(list.len(), 1, "duplicate bookmarks must collapse");
}

#[tokio::test]
async fn test_recipe_made_private_drops_from_list() {
    let db = common::create_test_database().await.unwrap();
    let (alice, _) = common::create_test_user(&db).await.unwrap();
    let (bruno, _) = common::create_test_user_with_email(&db, "bruno@example.com")
        .await
        .unwrap();
    let recipes = RecipesManager::new(db.pool().clone());
    let favorites = FavoritesManager::new(db.pool().clone());

    let created = recipes
        .create(alice, &common::sample_recipe_request("Flipped", true))
        .await
        .unwrap();
    favorites.add(bruno, created.recipe.id).await.unwrap();

    // Owner flips the recipe to private
    sqlx::query("UPDATE recipes SET is_public = 0 WHERE id = $1")
        .bind(created.recipe.id.to_string())
        .execute(db.pool())
        .await
        .unwrap();

    let list = favorites.list_for_user(bruno).await.unwrap();
    assert!(list.is_empty(), "private recipes drop out of the bookmark list");
}
