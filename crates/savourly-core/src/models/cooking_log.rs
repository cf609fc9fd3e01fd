// ABOUTME: Cooking-log domain model recording dated cooking attempts
// ABOUTME: Carries an optional 1-5 star rating and free-text notes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

use crate::constants::limits;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dated record of a user cooking a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookingLog {
    /// Unique identifier
    pub id: Uuid,
    /// Recipe that was cooked
    pub recipe_id: Uuid,
    /// User who cooked it
    pub user_id: Uuid,
    /// When the recipe was cooked
    pub cooked_at: DateTime<Utc>,
    /// Optional star rating, 1 to 5
    pub rating: Option<i64>,
    /// Optional free-text notes
    pub notes: Option<String>,
}

impl CookingLog {
    /// Check whether a rating value is within the accepted 1-5 range
    #[must_use]
    pub const fn is_valid_rating(rating: i64) -> bool {
        rating >= limits::MIN_RATING && rating <= limits::MAX_RATING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(CookingLog::is_valid_rating(1));
        assert!(CookingLog::is_valid_rating(3));
        assert!(CookingLog::is_valid_rating(5));
        assert!(!CookingLog::is_valid_rating(0));
        assert!(!CookingLog::is_valid_rating(6));
        assert!(!CookingLog::is_valid_rating(-1));
    }
}
