// ABOUTME: Core domain types and constants for the Savourly recipe service
// ABOUTME: Foundation crate shared by the server, binaries, and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

#![deny(unsafe_code)]

//! # Savourly Core
//!
//! Foundation crate for the Savourly recipe management service.
//!
//! - **models**: Recipe, ingredient, instruction, tag, and cooking-log types
//! - **constants**: Shared limits and defaults (title length, servings, ratings)
//!
//! This crate is deliberately free of database and HTTP dependencies so the
//! domain types can be used from any layer.

/// Shared limits and default values
pub mod constants;

/// Domain models for recipes and cooking logs
pub mod models;
