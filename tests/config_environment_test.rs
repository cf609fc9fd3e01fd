// ABOUTME: Integration tests for environment-driven configuration
// ABOUTME: Uses serial execution because environment variables are process-global
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Tests for `ServerConfig::from_env` and the file-backed database bootstrap

mod common;

use savourly::config::environment::{Environment, LogLevel, ServerConfig};
use savourly::database::Database;
use serial_test::serial;

const VARS: &[&str] = &[
    "HTTP_PORT",
    "LOG_LEVEL",
    "ENVIRONMENT",
    "DATABASE_URL",
    "AUTO_MIGRATE",
    "JWT_SECRET",
    "JWT_EXPIRY_HOURS",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_when_env_is_empty() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8081);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.environment, Environment::Development);
    assert!(config.database.auto_migrate);
    assert!(config.auth.jwt_secret.is_none());
    assert_eq!(config.auth.jwt_expiry_hours, 24);
}

#[test]
#[serial]
fn test_env_overrides() {
    clear_env();
    std::env::set_var("HTTP_PORT", "9090");
    std::env::set_var("LOG_LEVEL", "debug");
    std::env::set_var("ENVIRONMENT", "production");
    std::env::set_var("DATABASE_URL", "sqlite::memory:");
    std::env::set_var("AUTO_MIGRATE", "false");
    std::env::set_var("JWT_SECRET", "test-secret");
    std::env::set_var("JWT_EXPIRY_HOURS", "72");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9090);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.environment.is_production());
    assert!(config.database.url.is_memory());
    assert!(!config.database.auto_migrate);
    assert_eq!(config.auth.jwt_secret.as_deref(), Some("test-secret"));
    assert_eq!(config.auth.jwt_expiry_hours, 72);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_port_is_an_error() {
    clear_env();
    std::env::set_var("HTTP_PORT", "not-a-port");

    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

#[tokio::test]
#[serial]
async fn test_file_backed_database_bootstrap() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("savourly-test.db");
    let url = format!("sqlite:{}", db_path.display());

    // First open creates the file and the schema
    let db = Database::new(&url).await.unwrap();
    let (user_id, _) = common::create_test_user(&db).await.unwrap();
    drop(db);
    assert!(db_path.exists());

    // Reopening finds the persisted user
    let db = Database::new(&url).await.unwrap();
    let user = db.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(user.email, "test@example.com");
}
