// ABOUTME: Integration tests for the discover feed
// ABOUTME: Covers visibility, ownership exclusion, filters, and bookmark annotation
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Tests for the discover listing:
//! - Only public recipes from other users appear
//! - Filters narrow the feed
//! - `is_favorited` reflects the viewer's bookmarks

mod common;

use savourly::database::{FavoritesManager, RecipeFilter, RecipesManager};
use savourly_core::models::Difficulty;

#[tokio::test]
async fn test_discover_shows_only_others_public_recipes() {
    let db = common::create_test_database().await.unwrap();
    let (alice, _) = common::create_test_user(&db).await.unwrap();
    let (bruno, _) = common::create_test_user_with_email(&db, "bruno@example.com")
        .await
        .unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    manager
        .create(alice, &common::sample_recipe_request("Alice Public", true))
        .await
        .unwrap();
    manager
        .create(alice, &common::sample_recipe_request("Alice Private", false))
        .await
        .unwrap();
    manager
        .create(bruno, &common::sample_recipe_request("Bruno Public", true))
        .await
        .unwrap();

    let feed = manager
        .list_discover(Some(bruno), &RecipeFilter::default())
        .await
        .unwrap();

    // Bruno must not see his own recipe nor Alice's private one
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].recipe.title, "Alice Public");
}

#[tokio::test]
async fn test_discover_anonymous_viewer() {
    let db = common::create_test_database().await.unwrap();
    let (alice, _) = common::create_test_user(&db).await.unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    manager
        .create(alice, &common::sample_recipe_request("Public", true))
        .await
        .unwrap();
    manager
        .create(alice, &common::sample_recipe_request("Private", false))
        .await
        .unwrap();

    let feed = manager
        .list_discover(None, &RecipeFilter::default())
        .await
        .unwrap();

    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].recipe.title, "Public");
    assert!(!feed[0].is_favorited, "anonymous viewers have no bookmarks");
}

#[tokio::test]
async fn test_discover_marks_favorited_recipes() {
    let db = common::create_test_database().await.unwrap();
    let (alice, _) = common::create_test_user(&db).await.unwrap();
    let (bruno, _) = common::create_test_user_with_email(&db, "bruno@example.com")
        .await
        .unwrap();
    let manager = RecipesManager::new(db.pool().clone());
    let favorites = FavoritesManager::new(db.pool().clone());

    let liked = manager
        .create(alice, &common::sample_recipe_request("Liked", true))
        .await
        .unwrap();
    manager
        .create(alice, &common::sample_recipe_request("Not Liked", true))
        .await
        .unwrap();

    favorites.add(bruno, liked.recipe.id).await.unwrap();

    let feed = manager
        .list_discover(Some(bruno), &RecipeFilter::default())
        .await
        .unwrap();

    assert_eq!(feed.len(), 2);
    for item in &feed {
        assert_eq!(
            item.is_favorited,
            item.recipe.title == "Liked",
            "only the bookmarked recipe is annotated"
        );
    }
}

#[tokio::test]
async fn test_discover_filters() {
    let db = common::create_test_database().await.unwrap();
    let (alice, _) = common::create_test_user(&db).await.unwrap();
    let (bruno, _) = common::create_test_user_with_email(&db, "bruno@example.com")
        .await
        .unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    let mut easy = common::sample_recipe_request("Weeknight Stir Fry", true);
    easy.difficulty = Difficulty::Easy;
    let mut hard = common::sample_recipe_request("Weekend Wellington", true);
    hard.difficulty = Difficulty::Hard;

    manager.create(alice, &easy).await.unwrap();
    manager.create(alice, &hard).await.unwrap();

    let filtered = manager
        .list_discover(
            Some(bruno),
            &RecipeFilter {
                difficulty: Some(Difficulty::Easy),
                ..RecipeFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].recipe.title, "Weeknight Stir Fry");

    let queried = manager
        .list_discover(
            Some(bruno),
            &RecipeFilter {
                query: Some("wellington".to_owned()),
                ..RecipeFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(queried.len(), 1);
    assert_eq!(queried[0].recipe.title, "Weekend Wellington");
}
