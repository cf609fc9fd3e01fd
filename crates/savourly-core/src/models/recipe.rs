// ABOUTME: Recipe domain models with difficulty, tag catalog, and serving scaler
// ABOUTME: Defines Recipe, Ingredient, Instruction, and related types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Recipe difficulty for filtering and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Quick recipes with basic techniques
    Easy,
    /// Everyday cooking
    #[default]
    Medium,
    /// Involved recipes that need attention
    Hard,
}

impl Difficulty {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse from database string representation
    ///
    /// Unknown values fall back to `Medium`, matching the column default.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::Medium,
        }
    }
}

/// Error returned when a tag string is not in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tag: {0}")]
pub struct TagParseError(pub String);

/// Fixed catalog of recipe tags
///
/// Tags are a closed set so that filter chips and the discover feed stay
/// consistent across users. Free-form categorization goes in `cuisine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
    Appetizer,
    SideDish,
    Drink,
    Soup,
    Salad,
    Baking,
}

impl Tag {
    /// Every tag in the catalog, in display order
    pub const ALL: [Self; 11] = [
        Self::Breakfast,
        Self::Lunch,
        Self::Dinner,
        Self::Dessert,
        Self::Snack,
        Self::Appetizer,
        Self::SideDish,
        Self::Drink,
        Self::Soup,
        Self::Salad,
        Self::Baking,
    ];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Dessert => "dessert",
            Self::Snack => "snack",
            Self::Appetizer => "appetizer",
            Self::SideDish => "side-dish",
            Self::Drink => "drink",
            Self::Soup => "soup",
            Self::Salad => "salad",
            Self::Baking => "baking",
        }
    }
}

impl FromStr for Tag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|tag| tag.as_str() == s)
            .copied()
            .ok_or_else(|| TagParseError(s.to_owned()))
    }
}

/// Single ingredient line of a recipe
///
/// Amount and unit are both optional: "salt to taste" has neither,
/// "2 eggs" has an amount but no unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name
    pub name: String,
    /// Amount in the given unit, if measurable
    pub amount: Option<f64>,
    /// Free-text unit (g, cups, tbsp, ...)
    pub unit: Option<String>,
    /// Zero-based position preserving form order
    pub order_index: u32,
}

/// Single instruction step of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// One-based step number
    pub step_number: u32,
    /// Step content
    pub content: String,
}

/// A user-owned recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Recipe title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Free-text cuisine (Italian, Thai, ...)
    pub cuisine: Option<String>,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Preparation time in minutes
    pub prep_time_mins: Option<u16>,
    /// Cooking time in minutes
    pub cook_time_mins: Option<u16>,
    /// Number of servings the ingredient amounts yield
    pub servings: u16,
    /// Optional image URL
    pub image_url: Option<String>,
    /// Whether the recipe shows up in the discover feed
    pub is_public: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Total time (prep + cook), saturating; `None` when neither is set
    #[must_use]
    pub const fn total_time_mins(&self) -> Option<u16> {
        match (self.prep_time_mins, self.cook_time_mins) {
            (Some(prep), Some(cook)) => Some(prep.saturating_add(cook)),
            (Some(prep), None) => Some(prep),
            (None, Some(cook)) => Some(cook),
            (None, None) => None,
        }
    }
}

/// A recipe together with its ordered ingredients, instructions, and tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetails {
    /// The recipe row
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Ingredients ordered by `order_index`
    pub ingredients: Vec<Ingredient>,
    /// Instructions ordered by `step_number`
    pub instructions: Vec<Instruction>,
    /// Tags from the fixed catalog
    pub tags: Vec<Tag>,
}

/// Scale ingredient amounts from one serving count to another
///
/// Every present amount is multiplied by `to / from`; names, units, and
/// ordering are untouched. Scaling to the same serving count, or from a
/// recipe that declares zero servings, returns the ingredients unchanged.
#[must_use]
pub fn scale_ingredients(ingredients: &[Ingredient], from: u16, to: u16) -> Vec<Ingredient> {
    if from == to || from == 0 {
        return ingredients.to_vec();
    }

    let factor = f64::from(to) / f64::from(from);
    ingredients
        .iter()
        .map(|ingredient| Ingredient {
            name: ingredient.name.clone(),
            amount: ingredient.amount.map(|a| a * factor),
            unit: ingredient.unit.clone(),
            order_index: ingredient.order_index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, amount: Option<f64>, order_index: u32) -> Ingredient {
        Ingredient {
            name: name.to_owned(),
            amount,
            unit: None,
            order_index,
        }
    }

    #[test]
    fn test_difficulty_round_trip() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::parse(difficulty.as_str()), difficulty);
        }
    }

    #[test]
    fn test_difficulty_unknown_defaults_to_medium() {
        assert_eq!(Difficulty::parse("impossible"), Difficulty::Medium);
        assert_eq!(Difficulty::parse(""), Difficulty::Medium);
    }

    #[test]
    fn test_tag_round_trip() {
        for tag in Tag::ALL {
            assert_eq!(tag.as_str().parse::<Tag>().unwrap(), tag);
        }
    }

    #[test]
    fn test_tag_rejects_unknown() {
        let err = "brunch".parse::<Tag>().unwrap_err();
        assert_eq!(err, TagParseError("brunch".to_owned()));
    }

    #[test]
    fn test_scale_ingredients_doubles_amounts() {
        let ingredients = vec![
            ingredient("flour", Some(250.0), 0),
            ingredient("salt", None, 1),
        ];

        let scaled = scale_ingredients(&ingredients, 2, 4);

        assert!((scaled[0].amount.unwrap() - 500.0).abs() < f64::EPSILON);
        assert_eq!(scaled[1].amount, None, "unmeasured amounts stay unset");
        assert_eq!(scaled[1].order_index, 1);
    }

    #[test]
    fn test_scale_ingredients_identity_cases() {
        let ingredients = vec![ingredient("flour", Some(250.0), 0)];

        let same = scale_ingredients(&ingredients, 4, 4);
        assert!((same[0].amount.unwrap() - 250.0).abs() < f64::EPSILON);

        // Zero base servings would divide by zero; treated as identity
        let zero = scale_ingredients(&ingredients, 0, 8);
        assert!((zero[0].amount.unwrap() - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_time() {
        let now = Utc::now();
        let mut recipe = Recipe {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Test".to_owned(),
            description: None,
            cuisine: None,
            difficulty: Difficulty::Medium,
            prep_time_mins: Some(10),
            cook_time_mins: Some(25),
            servings: 4,
            image_url: None,
            is_public: false,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(recipe.total_time_mins(), Some(35));

        recipe.cook_time_mins = None;
        assert_eq!(recipe.total_time_mins(), Some(10));

        recipe.prep_time_mins = None;
        assert_eq!(recipe.total_time_mins(), None);
    }
}
