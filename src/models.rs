// ABOUTME: Common data models shared across the Savourly service
// ABOUTME: Defines the User account model and its constructor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Email address (unique)
    pub email: String,
    /// Optional display name shown on public recipes
    pub display_name: Option<String>,
    /// bcrypt password hash
    pub password_hash: String,
    /// Whether the account can log in
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp, bumped on login
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a fresh id
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            is_active: true,
            created_at: now,
            last_active: now,
        }
    }
}
