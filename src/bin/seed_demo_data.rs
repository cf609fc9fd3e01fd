// ABOUTME: Seed binary that fills the database with demo users and recipes
// ABOUTME: Idempotent by email check so repeated runs do not duplicate data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! # Demo Data Seeder
//!
//! Creates two demo accounts with a handful of recipes, bookmarks, and
//! cooking logs so a fresh instance has something to browse.

use anyhow::Result;
use clap::Parser;
use savourly::database::{
    CookingLogsManager, CreateRecipeRequest, Database, FavoritesManager, IngredientInput,
    NewCookingLog, RecipesManager,
};
use savourly::models::User;
use savourly_core::models::{Difficulty, Tag};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "seed-demo-data")]
#[command(about = "Seed the Savourly database with demo users and recipes")]
struct Args {
    /// Database URL (e.g. sqlite:./data/savourly.db)
    #[arg(long, default_value = "sqlite:./data/savourly.db")]
    database_url: String,
}

struct SeedRecipe {
    title: &'static str,
    description: &'static str,
    cuisine: &'static str,
    difficulty: Difficulty,
    prep_time_mins: u16,
    cook_time_mins: u16,
    servings: u16,
    is_public: bool,
    tags: &'static [Tag],
    ingredients: &'static [(&'static str, f64, &'static str)],
    instructions: &'static [&'static str],
}

const RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        title: "Spaghetti Carbonara",
        description: "Classic Roman pasta with eggs, cheese, pancetta, and black pepper.",
        cuisine: "Italian",
        difficulty: Difficulty::Medium,
        prep_time_mins: 10,
        cook_time_mins: 20,
        servings: 4,
        is_public: true,
        tags: &[Tag::Dinner],
        ingredients: &[
            ("Spaghetti", 400.0, "g"),
            ("Pancetta", 200.0, "g"),
            ("Eggs", 4.0, "whole"),
            ("Pecorino Romano", 100.0, "g"),
            ("Black pepper", 2.0, "tsp"),
        ],
        instructions: &[
            "Bring a large pot of salted water to a boil and cook spaghetti until al dente.",
            "Cut pancetta into small cubes and cook in a skillet until crispy.",
            "Whisk together eggs, grated Pecorino Romano, and black pepper.",
            "Drain the pasta, reserving a cup of pasta water.",
            "Toss hot pasta with pancetta off the heat, then fold in the egg mixture, loosening with pasta water.",
        ],
    },
    SeedRecipe {
        title: "Chicken Teriyaki",
        description: "Japanese-style glazed chicken thighs with homemade teriyaki sauce.",
        cuisine: "Japanese",
        difficulty: Difficulty::Easy,
        prep_time_mins: 15,
        cook_time_mins: 25,
        servings: 4,
        is_public: true,
        tags: &[Tag::Dinner, Tag::Lunch],
        ingredients: &[
            ("Chicken thighs", 600.0, "g"),
            ("Soy sauce", 4.0, "tbsp"),
            ("Mirin", 3.0, "tbsp"),
            ("Sugar", 2.0, "tbsp"),
            ("Steamed rice", 400.0, "g"),
        ],
        instructions: &[
            "Mix soy sauce, mirin, and sugar to make the teriyaki sauce.",
            "Cook chicken skin-side down over medium-high heat until golden.",
            "Flip, add the sauce, and simmer until glazed.",
            "Slice and serve over steamed rice.",
        ],
    },
    SeedRecipe {
        title: "Overnight Oats",
        description: "No-cook breakfast oats soaked in milk with fruit.",
        cuisine: "American",
        difficulty: Difficulty::Easy,
        prep_time_mins: 5,
        cook_time_mins: 0,
        servings: 1,
        is_public: false,
        tags: &[Tag::Breakfast, Tag::Snack],
        ingredients: &[
            ("Rolled oats", 50.0, "g"),
            ("Milk", 120.0, "ml"),
            ("Honey", 1.0, "tbsp"),
            ("Berries", 80.0, "g"),
        ],
        instructions: &[
            "Combine oats, milk, and honey in a jar.",
            "Refrigerate overnight.",
            "Top with berries before serving.",
        ],
    },
    SeedRecipe {
        title: "French Onion Soup",
        description: "Slow-caramelized onions in rich broth with a cheesy crouton lid.",
        cuisine: "French",
        difficulty: Difficulty::Hard,
        prep_time_mins: 20,
        cook_time_mins: 70,
        servings: 6,
        is_public: true,
        tags: &[Tag::Soup, Tag::Dinner],
        ingredients: &[
            ("Yellow onions", 1000.0, "g"),
            ("Beef stock", 1500.0, "ml"),
            ("Baguette", 1.0, "whole"),
            ("Gruyère", 200.0, "g"),
            ("Butter", 60.0, "g"),
        ],
        instructions: &[
            "Slice onions thinly and caramelize in butter over low heat, about 45 minutes.",
            "Add stock and simmer for 25 minutes, seasoning to taste.",
            "Ladle into oven-safe bowls, top with baguette slices and Gruyère.",
            "Broil until the cheese is bubbling and browned.",
        ],
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    savourly::logging::init_from_env()?;
    let args = Args::parse();

    let database = Database::new(&args.database_url).await?;
    info!("Seeding demo data into {}", args.database_url);

    let alice = ensure_user(&database, "alice@savourly.dev", "Alice").await?;
    let bruno = ensure_user(&database, "bruno@savourly.dev", "Bruno").await?;

    let recipes = RecipesManager::new(database.pool().clone());
    let favorites = FavoritesManager::new(database.pool().clone());
    let logs = CookingLogsManager::new(database.pool().clone());

    if recipes.count_mine(alice).await? > 0 {
        info!("Demo recipes already present; nothing to do");
        return Ok(());
    }

    let mut created: Vec<Uuid> = Vec::new();
    for (index, seed) in RECIPES.iter().enumerate() {
        // Alternate ownership between the two demo users
        let owner = if index % 2 == 0 { alice } else { bruno };
        let details = recipes.create(owner, &seed_to_request(seed)).await?;
        info!("Created recipe '{}' for {}", seed.title, owner);
        created.push(details.recipe.id);
    }

    // Bruno bookmarks Alice's carbonara and logs a cooking attempt
    if let Some(first) = created.first() {
        favorites.add(bruno, *first).await?;
        logs.add(
            *first,
            bruno,
            &NewCookingLog {
                cooked_at: None,
                rating: Some(5),
                notes: Some("Creamy and quick. Added extra pepper.".to_owned()),
            },
        )
        .await?;
    }

    info!("Seeded {} demo recipes", created.len());
    Ok(())
}

async fn ensure_user(database: &Database, email: &str, name: &str) -> Result<Uuid> {
    if let Some(existing) = database.get_user_by_email(email).await? {
        return Ok(existing.id);
    }

    let password_hash = bcrypt::hash("password123", bcrypt::DEFAULT_COST)?;
    let user = User::new(email.to_owned(), password_hash, Some(name.to_owned()));
    let id = database.create_user(&user).await?;
    info!("Created demo user {email}");
    Ok(id)
}

fn seed_to_request(seed: &SeedRecipe) -> CreateRecipeRequest {
    CreateRecipeRequest {
        title: seed.title.to_owned(),
        description: Some(seed.description.to_owned()),
        cuisine: Some(seed.cuisine.to_owned()),
        difficulty: seed.difficulty,
        prep_time_mins: Some(seed.prep_time_mins),
        cook_time_mins: Some(seed.cook_time_mins),
        servings: Some(seed.servings),
        image_url: None,
        is_public: seed.is_public,
        ingredients: seed
            .ingredients
            .iter()
            .map(|(name, amount, unit)| IngredientInput {
                name: (*name).to_owned(),
                amount: Some(*amount),
                unit: Some((*unit).to_owned()),
            })
            .collect(),
        instructions: seed
            .instructions
            .iter()
            .map(|step| (*step).to_owned())
            .collect(),
        tags: seed.tags.to_vec(),
    }
}
