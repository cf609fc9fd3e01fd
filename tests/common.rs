// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, and user creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `savourly`
//!
//! Common setup functions to reduce duplication across integration tests.

use anyhow::Result;
use savourly::{
    auth::{generate_jwt_secret, AuthManager},
    config::environment::ServerConfig,
    database::{CreateRecipeRequest, Database, IngredientInput},
    models::User,
    server::ServerResources,
};
use savourly_core::models::{Difficulty, Tag};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Create test authentication manager
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(generate_jwt_secret().to_vec(), 24)
}

/// Create a standard test user
pub async fn create_test_user(database: &Database) -> Result<(Uuid, User)> {
    create_test_user_with_email(database, "test@example.com").await
}

/// Create a test user with a custom email
pub async fn create_test_user_with_email(database: &Database, email: &str) -> Result<(Uuid, User)> {
    let user = User::new(
        email.to_owned(),
        bcrypt::hash("password123", 4)?,
        Some("Test User".to_owned()),
    );
    let user_id = user.id;

    database.create_user(&user).await?;
    Ok((user_id, user))
}

/// Create test `ServerResources` with all components initialized
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let auth_manager = create_test_auth_manager();
    let config = Arc::new(ServerConfig::default());

    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        config,
    )))
}

/// Issue a bearer token for an existing user
pub fn bearer_for(resources: &Arc<ServerResources>, user: &User) -> Result<String> {
    let token = resources.auth_manager.generate_token(user)?;
    Ok(format!("Bearer {token}"))
}

/// A small but complete recipe creation request
pub fn sample_recipe_request(title: &str, is_public: bool) -> CreateRecipeRequest {
    CreateRecipeRequest {
        title: title.to_owned(),
        description: Some("A test recipe".to_owned()),
        cuisine: Some("Italian".to_owned()),
        difficulty: Difficulty::Medium,
        prep_time_mins: Some(10),
        cook_time_mins: Some(20),
        servings: Some(2),
        image_url: None,
        is_public,
        ingredients: vec![
            IngredientInput {
                name: "Flour".to_owned(),
                amount: Some(250.0),
                unit: Some("g".to_owned()),
            },
            IngredientInput {
                name: "Salt".to_owned(),
                amount: None,
                unit: None,
            },
        ],
        instructions: vec![
            "Mix everything.".to_owned(),
            "Bake until done.".to_owned(),
        ],
        tags: vec![Tag::Dinner],
    }
}
