// ABOUTME: Domain model module organization for Savourly core types
// ABOUTME: Re-exports recipe and cooking-log models for convenient imports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

/// Cooking-log model
pub mod cooking_log;

/// Recipe, ingredient, instruction, and tag models
pub mod recipe;

pub use cooking_log::CookingLog;
pub use recipe::{
    scale_ingredients, Difficulty, Ingredient, Instruction, Recipe, RecipeDetails, Tag,
    TagParseError,
};
