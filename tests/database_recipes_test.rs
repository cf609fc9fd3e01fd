// ABOUTME: Integration tests for recipe database operations
// ABOUTME: Covers transactional create/update, owner scoping, and filtered listings
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Tests for the recipes storage manager:
//! - Transactional create with ordered children
//! - Replace-style updates and owner scoping
//! - Dynamic list filters (query, cuisine, tag, difficulty)

mod common;

use savourly::database::{RecipeFilter, RecipesManager, UpdateRecipeRequest};
use savourly_core::models::{Difficulty, Tag};
use uuid::Uuid;

// ============================================================================
// Create / Get
// ============================================================================

#[tokio::test]
async fn test_create_recipe_with_children() {
    let db = common::create_test_database().await.unwrap();
    let (user_id, _) = common::create_test_user(&db).await.unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    let details = manager
        .create(user_id, &common::sample_recipe_request("Focaccia", true))
        .await
        .unwrap();

    assert_eq!(details.recipe.title, "Focaccia");
    assert_eq!(details.recipe.user_id, user_id);
    assert_eq!(details.recipe.servings, 2);
    assert!(details.recipe.is_public);
    assert_eq!(details.recipe.total_time_mins(), Some(30));

    assert_eq!(details.ingredients.len(), 2);
    assert_eq!(details.ingredients[0].name, "Flour");
    assert_eq!(details.ingredients[0].order_index, 0);
    assert_eq!(details.ingredients[1].order_index, 1);

    assert_eq!(details.instructions.len(), 2);
    assert_eq!(details.instructions[0].step_number, 1);
    assert_eq!(details.instructions[1].step_number, 2);

    assert_eq!(details.tags, vec![Tag::Dinner]);
}

#[tokio::test]
async fn test_create_skips_blank_lines() {
    let db = common::create_test_database().await.unwrap();
    let (user_id, _) = common::create_test_user(&db).await.unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    let mut request = common::sample_recipe_request("Sparse", false);
    request.ingredients[1].name = "   ".to_owned();
    request.instructions.push(String::new());

    let details = manager.create(user_id, &request).await.unwrap();

    // Blank ingredient dropped; indexes stay dense
    assert_eq!(details.ingredients.len(), 1);
    assert_eq!(details.ingredients[0].order_index, 0);
    // Blank instruction dropped; step numbers stay dense
    assert_eq!(details.instructions.len(), 2);
    assert_eq!(details.instructions[1].step_number, 2);
}

#[tokio::test]
async fn test_get_missing_recipe() {
    let db = common::create_test_database().await.unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    assert!(manager.get(Uuid::new_v4()).await.unwrap().is_none());
    assert!(manager.get_details(Uuid::new_v4()).await.unwrap().is_none());
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_replaces_children() {
    let db = common::create_test_database().await.unwrap();
    let (user_id, _) = common::create_test_user(&db).await.unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    let created = manager
        .create(user_id, &common::sample_recipe_request("Original", false))
        .await
        .unwrap();

    let base = common::sample_recipe_request("Renamed", true);
    let update = UpdateRecipeRequest {
        title: base.title,
        description: Some("Updated description".to_owned()),
        cuisine: Some("French".to_owned()),
        difficulty: Difficulty::Hard,
        prep_time_mins: Some(5),
        cook_time_mins: None,
        servings: Some(6),
        image_url: None,
        is_public: true,
        ingredients: vec![savourly::database::IngredientInput {
            name: "Butter".to_owned(),
            amount: Some(100.0),
            unit: Some("g".to_owned()),
        }],
        instructions: vec!["Melt the butter.".to_owned()],
        tags: vec![Tag::Baking, Tag::Dessert],
    };

    let updated = manager
        .update(created.recipe.id, user_id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.recipe.title, "Renamed");
    assert_eq!(updated.recipe.difficulty, Difficulty::Hard);
    assert_eq!(updated.recipe.servings, 6);
    assert!(updated.recipe.is_public);
    assert!(updated.recipe.updated_at >= created.recipe.updated_at);

    // Children fully replaced
    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.ingredients[0].name, "Butter");
    assert_eq!(updated.instructions.len(), 1);
    assert_eq!(updated.tags.len(), 2);
}

#[tokio::test]
async fn test_update_is_owner_scoped() {
    let db = common::create_test_database().await.unwrap();
    let (owner, _) = common::create_test_user(&db).await.unwrap();
    let (other, _) = common::create_test_user_with_email(&db, "other@example.com")
        .await
        .unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    let created = manager
        .create(owner, &common::sample_recipe_request("Mine", true))
        .await
        .unwrap();

    let base = common::sample_recipe_request("Hijacked", true);
    let update = UpdateRecipeRequest {
        title: base.title,
        description: base.description,
        cuisine: base.cuisine,
        difficulty: base.difficulty,
        prep_time_mins: base.prep_time_mins,
        cook_time_mins: base.cook_time_mins,
        servings: base.servings,
        image_url: base.image_url,
        is_public: base.is_public,
        ingredients: base.ingredients,
        instructions: base.instructions,
        tags: base.tags,
    };

    let result = manager.update(created.recipe.id, other, &update).await.unwrap();
    assert!(result.is_none(), "non-owner update must not match");

    let unchanged = manager.get(created.recipe.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Mine");
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_cascades_children() {
    let db = common::create_test_database().await.unwrap();
    let (user_id, _) = common::create_test_user(&db).await.unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    let created = manager
        .create(user_id, &common::sample_recipe_request("Doomed", true))
        .await
        .unwrap();

    assert!(manager.delete(created.recipe.id, user_id).await.unwrap());
    assert!(manager.get(created.recipe.id).await.unwrap().is_none());

    // Cascade removed the child rows
    let ingredient_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM ingredients WHERE recipe_id = $1")
            .bind(created.recipe.id.to_string())
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(ingredient_count, 0);
}

#[tokio::test]
async fn test_delete_is_owner_scoped() {
    let db = common::create_test_database().await.unwrap();
    let (owner, _) = common::create_test_user(&db).await.unwrap();
    let (other, _) = common::create_test_user_with_email(&db, "other@example.com")
        .await
        .unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    let created = manager
        .create(owner, &common::sample_recipe_request("Protected", true))
        .await
        .unwrap();

    assert!(!manager.delete(created.recipe.id, other).await.unwrap());
    assert!(manager.get(created.recipe.id).await.unwrap().is_some());
}

// ============================================================================
// Listing and filters
// ============================================================================

#[tokio::test]
async fn test_list_mine_filters() {
    let db = common::create_test_database().await.unwrap();
    let (user_id, _) = common::create_test_user(&db).await.unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    let mut pasta = common::sample_recipe_request("Pasta Carbonara", false);
    pasta.cuisine = Some("Italian".to_owned());

    let mut curry = common::sample_recipe_request("Green Curry", false);
    curry.cuisine = Some("Thai".to_owned());
    curry.difficulty = Difficulty::Hard;
    curry.tags = vec![Tag::Dinner, Tag::Soup];

    manager.create(user_id, &pasta).await.unwrap();
    manager.create(user_id, &curry).await.unwrap();

    // Text query against the title
    let found = manager
        .list_mine(
            user_id,
            &RecipeFilter {
                query: Some("carbonara".to_owned()),
                ..RecipeFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Pasta Carbonara");

    // Cuisine filter
    let thai = manager
        .list_mine(
            user_id,
            &RecipeFilter {
                cuisine: Some("Thai".to_owned()),
                ..RecipeFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(thai.len(), 1);
    assert_eq!(thai[0].title, "Green Curry");

    // Difficulty filter
    let hard = manager
        .list_mine(
            user_id,
            &RecipeFilter {
                difficulty: Some(Difficulty::Hard),
                ..RecipeFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(hard.len(), 1);

    // Tag filter
    let soups = manager
        .list_mine(
            user_id,
            &RecipeFilter {
                tag: Some(Tag::Soup),
                ..RecipeFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(soups.len(), 1);
    assert_eq!(soups[0].title, "Green Curry");

    // No filters returns both
    let all = manager
        .list_mine(user_id, &RecipeFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(manager.count_mine(user_id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_list_mine_excludes_other_users() {
    let db = common::create_test_database().await.unwrap();
    let (alice, _) = common::create_test_user(&db).await.unwrap();
    let (bruno, _) = common::create_test_user_with_email(&db, "bruno@example.com")
        .await
        .unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    manager
        .create(alice, &common::sample_recipe_request("Alice's", true))
        .await
        .unwrap();
    manager
        .create(bruno, &common::sample_recipe_request("Bruno's", true))
        .await
        .unwrap();

    let mine = manager
        .list_mine(alice, &RecipeFilter::default())
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Alice's");
}

#[tokio::test]
async fn test_distinct_cuisines_and_tags() {
    let db = common::create_test_database().await.unwrap();
    let (user_id, _) = common::create_test_user(&db).await.unwrap();
    let manager = RecipesManager::new(db.pool().clone());

    let mut first = common::sample_recipe_request("One", false);
    first.cuisine = Some("Italian".to_owned());
    first.tags = vec![Tag::Dinner];

    let mut second = common::sample_recipe_request("Two", false);
    second.cuisine = Some("Thai".to_owned());
    second.tags = vec![Tag::Dinner, Tag::Salad];

    manager.create(user_id, &first).await.unwrap();
    manager.create(user_id, &second).await.unwrap();

    let cuisines = manager.distinct_cuisines().await.unwrap();
    assert_eq!(cuisines, vec!["Italian".to_owned(), "Thai".to_owned()]);

    let tags = manager.distinct_tags().await.unwrap();
    assert_eq!(tags.len(), 2);
    assert!(tags.contains(&Tag::Dinner));
    assert!(tags.contains(&Tag::Salad));
}
