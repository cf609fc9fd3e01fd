// ABOUTME: Main library entry point for the Savourly recipe management service
// ABOUTME: Provides a JSON REST API for recipes, favorites, and cooking logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

#![deny(unsafe_code)]

//! # Savourly
//!
//! A multi-user recipe management service. Users register, create and edit
//! recipes (ingredients, instructions, tags, difficulty, servings), browse
//! and filter their own recipes, discover other users' public recipes,
//! bookmark them, and keep dated cooking logs with ratings and notes.
//!
//! ## Architecture
//!
//! - **database**: SQLite storage via `sqlx` with per-domain managers
//! - **routes**: axum routers organized by domain, thin handlers over managers
//! - **auth**: bcrypt password hashing and HS256 JWT sessions
//! - **config**: environment-driven server configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use savourly::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Savourly configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication and session management
pub mod auth;

/// Configuration management
pub mod config;

/// Database access and per-domain storage managers
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Locale negotiation and message catalogs for user-facing strings
pub mod i18n;

/// Production logging and structured output
pub mod logging;

/// Common data models
pub mod models;

/// HTTP routes organized by domain
pub mod routes;

/// Server resources and router assembly
pub mod server;
