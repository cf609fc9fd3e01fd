// ABOUTME: Shared limits and default values used across the Savourly service
// ABOUTME: Centralizes validation bounds so routes and storage agree on them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

/// Validation limits for user input
pub mod limits {
    /// Maximum recipe title length in characters
    pub const MAX_TITLE_LENGTH: usize = 200;

    /// Maximum number of servings a recipe can declare
    pub const MAX_SERVINGS: u16 = 100;

    /// Default number of servings when the client omits it
    pub const DEFAULT_SERVINGS: u16 = 4;

    /// Minimum password length for registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// Minimum cooking-log rating (inclusive)
    pub const MIN_RATING: i64 = 1;

    /// Maximum cooking-log rating (inclusive)
    pub const MAX_RATING: i64 = 5;

    /// Default page size for list endpoints
    pub const DEFAULT_PAGE_SIZE: u32 = 50;

    /// Maximum page size accepted from clients
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Default JWT session lifetime in hours
    pub const DEFAULT_SESSION_HOURS: i64 = 24;
}
