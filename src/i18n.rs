// ABOUTME: Locale negotiation and message catalogs for user-facing strings
// ABOUTME: Picks a supported language from Accept-Language, defaulting to English
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Internationalization for user-facing API messages
//!
//! The service localizes the handful of human-readable strings it emits
//! (confirmation, not-found, and validation messages). Locale selection is
//! driven by the `Accept-Language` request header.

use axum::http::HeaderMap;

/// Supported UI locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    French,
    German,
}

impl Locale {
    /// Pick the best supported locale from an `Accept-Language` header value
    ///
    /// Entries are considered in header order; the first supported language
    /// wins. Quality weights are ignored since browsers already order by
    /// preference. Unknown or missing headers fall back to English.
    #[must_use]
    pub fn negotiate(header: Option<&str>) -> Self {
        let Some(header) = header else {
            return Self::English;
        };

        for entry in header.split(',') {
            let lang = entry.split(';').next().unwrap_or("").trim();
            let primary = lang.split('-').next().unwrap_or("").to_lowercase();
            match primary.as_str() {
                "en" => return Self::English,
                "fr" => return Self::French,
                "de" => return Self::German,
                _ => {}
            }
        }

        Self::English
    }

    /// Negotiate from request headers
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = headers
            .get(http::header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        Self::negotiate(header)
    }

    /// ISO 639-1 code for this locale
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
            Self::German => "de",
        }
    }
}

/// Message keys for localized strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// Shown after successful registration
    RegistrationSuccess,
    /// Recipe lookup failed
    RecipeNotFound,
    /// Cooking log lookup failed
    LogNotFound,
    /// Recipe title missing or blank
    TitleRequired,
    /// No usable ingredient lines
    IngredientRequired,
    /// No usable instruction steps
    InstructionRequired,
    /// Rating outside 1-5
    InvalidRating,
    /// Attempt to bookmark a private recipe
    RecipeNotPublic,
}

/// Look up a localized message
#[must_use]
pub const fn message(locale: Locale, key: MessageKey) -> &'static str {
    match (locale, key) {
        (Locale::English, MessageKey::RegistrationSuccess) => "Account created successfully.",
        (Locale::English, MessageKey::RecipeNotFound) => "Recipe not found",
        (Locale::English, MessageKey::LogNotFound) => "Cooking log not found",
        (Locale::English, MessageKey::TitleRequired) => "Title is required.",
        (Locale::English, MessageKey::IngredientRequired) => {
            "At least one ingredient is required."
        }
        (Locale::English, MessageKey::InstructionRequired) => {
            "At least one instruction step is required."
        }
        (Locale::English, MessageKey::InvalidRating) => "Rating must be between 1 and 5.",
        (Locale::English, MessageKey::RecipeNotPublic) => {
            "Only public recipes can be bookmarked."
        }

        (Locale::French, MessageKey::RegistrationSuccess) => "Compte créé avec succès.",
        (Locale::French, MessageKey::RecipeNotFound) => "Recette introuvable",
        (Locale::French, MessageKey::LogNotFound) => "Journal de cuisine introuvable",
        (Locale::French, MessageKey::TitleRequired) => "Le titre est obligatoire.",
        (Locale::French, MessageKey::IngredientRequired) => {
            "Au moins un ingrédient est requis."
        }
        (Locale::French, MessageKey::InstructionRequired) => {
            "Au moins une étape d'instruction est requise."
        }
        (Locale::French, MessageKey::InvalidRating) => "La note doit être comprise entre 1 et 5.",
        (Locale::French, MessageKey::RecipeNotPublic) => {
            "Seules les recettes publiques peuvent être ajoutées aux favoris."
        }

        (Locale::German, MessageKey::RegistrationSuccess) => "Konto erfolgreich erstellt.",
        (Locale::German, MessageKey::RecipeNotFound) => "Rezept nicht gefunden",
        (Locale::German, MessageKey::LogNotFound) => "Kochprotokoll nicht gefunden",
        (Locale::German, MessageKey::TitleRequired) => "Titel ist erforderlich.",
        (Locale::German, MessageKey::IngredientRequired) => {
            "Mindestens eine Zutat ist erforderlich."
        }
        (Locale::German, MessageKey::InstructionRequired) => {
            "Mindestens ein Zubereitungsschritt ist erforderlich."
        }
        (Locale::German, MessageKey::InvalidRating) => {
            "Die Bewertung muss zwischen 1 und 5 liegen."
        }
        (Locale::German, MessageKey::RecipeNotPublic) => {
            "Nur öffentliche Rezepte können gemerkt werden."
        }
    }
}
