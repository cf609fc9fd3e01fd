// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use savourly_core::constants::limits;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for security and logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite { path: PathBuf },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    ///
    /// Accepts `sqlite:<path>`, `sqlite::memory:`, or a bare file path.
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/savourly.db"),
        }
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Run migrations on startup
    pub auto_migrate: bool,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret; generated at startup when unset
    pub jwt_secret: Option<String>,
    /// JWT expiry time in hours
    pub jwt_expiry_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_expiry_hours: limits::DEFAULT_SESSION_HOURS,
        }
    }
}

/// Server configuration loaded from environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8081,
            log_level: LogLevel::default(),
            environment: Environment::default(),
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
                auto_migrate: true,
            },
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Recognized variables: `HTTP_PORT`, `LOG_LEVEL`, `ENVIRONMENT`,
    /// `DATABASE_URL`, `AUTO_MIGRATE`, `JWT_SECRET`, `JWT_EXPIRY_HOURS`.
    ///
    /// # Errors
    ///
    /// Returns an error when a set variable fails to parse (port or expiry
    /// hours that are not numbers).
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("Invalid HTTP_PORT: {value}"))?,
            Err(_) => 8081,
        };

        let log_level = env::var("LOG_LEVEL")
            .map(|value| LogLevel::from_str_or_default(&value))
            .unwrap_or_default();

        let environment = env::var("ENVIRONMENT")
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let url = env::var("DATABASE_URL")
            .map(|value| DatabaseUrl::parse_url(&value))
            .unwrap_or_default();

        let auto_migrate = env::var("AUTO_MIGRATE")
            .map(|value| value != "false" && value != "0")
            .unwrap_or(true);

        let jwt_secret = env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());

        let jwt_expiry_hours = match env::var("JWT_EXPIRY_HOURS") {
            Ok(value) => value
                .parse::<i64>()
                .with_context(|| format!("Invalid JWT_EXPIRY_HOURS: {value}"))?,
            Err(_) => limits::DEFAULT_SESSION_HOURS,
        };

        Ok(Self {
            http_port,
            log_level,
            environment,
            database: DatabaseConfig { url, auto_migrate },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours,
            },
        })
    }

    /// Human-readable configuration summary for startup logs
    ///
    /// Secrets are never included.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} env={} log={} database={} auto_migrate={} jwt_expiry={}h",
            self.http_port,
            self.environment,
            self.log_level,
            self.database.url,
            self.database.auto_migrate,
            self.auth.jwt_expiry_hours
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert!(DatabaseUrl::parse_url("sqlite::memory:").is_memory());

        let file = DatabaseUrl::parse_url("sqlite:./data/savourly.db");
        assert_eq!(file.to_connection_string(), "sqlite:./data/savourly.db");

        // Bare paths are treated as sqlite files
        let bare = DatabaseUrl::parse_url("./savourly.db");
        assert_eq!(bare.to_connection_string(), "sqlite:./savourly.db");
    }

    #[test]
    fn test_log_level_fallback() {
        assert_eq!(LogLevel::from_str_or_default("warn"), LogLevel::Warn);
        assert_eq!(LogLevel::from_str_or_default("verbose"), LogLevel::Info);
    }

    #[test]
    fn test_environment_aliases() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("anything"),
            Environment::Development
        );
    }

    #[test]
    fn test_summary_has_no_secret() {
        let config = ServerConfig {
            auth: AuthConfig {
                jwt_secret: Some("super-secret-value".to_owned()),
                jwt_expiry_hours: 24,
            },
            ..ServerConfig::default()
        };
        assert!(!config.summary().contains("super-secret-value"));
    }
}
