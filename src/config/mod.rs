// ABOUTME: Configuration module organization for the Savourly service
// ABOUTME: Re-exports the environment-driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

/// Environment-based configuration management
pub mod environment;

pub use environment::ServerConfig;
