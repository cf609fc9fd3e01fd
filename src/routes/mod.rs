// ABOUTME: Route module organization for Savourly HTTP endpoints
// ABOUTME: Centralized route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Route module for the Savourly service
//!
//! Routes are organized by domain. Each module contains route definitions
//! and thin handler functions that delegate to the database managers.

/// Authentication routes (register, login, refresh)
pub mod auth;
/// Cooking-log routes
pub mod cooking_logs;
/// Discover feed and filter-chip routes
pub mod discover;
/// Favorite (bookmark) routes
pub mod favorites;
/// Health check and readiness routes
pub mod health;
/// Recipe CRUD routes
pub mod recipes;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Authentication service
pub use auth::AuthService;
/// Login request payload
pub use auth::LoginRequest;
/// Login response with token
pub use auth::LoginResponse;
/// User registration request
pub use auth::RegisterRequest;
/// Registration response with user details
pub use auth::RegisterResponse;
/// Cooking-log route handlers
pub use cooking_logs::CookingLogRoutes;
/// Discover feed route handlers
pub use discover::DiscoverRoutes;
/// Favorite route handlers
pub use favorites::FavoriteRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Recipe route handlers
pub use recipes::RecipeRoutes;
