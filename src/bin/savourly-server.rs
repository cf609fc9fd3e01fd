// ABOUTME: Server binary for the Savourly recipe management service
// ABOUTME: Loads configuration, initializes storage and auth, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! # Savourly Server Binary
//!
//! Starts the Savourly recipe API with user authentication and SQLite
//! storage.

use anyhow::Result;
use clap::Parser;
use savourly::{
    auth::{generate_jwt_secret, AuthManager},
    config::environment::ServerConfig,
    database::Database,
    logging,
    server::{SavourlyServer, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "savourly-server")]
#[command(about = "Savourly - multi-user recipe management service")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. sqlite:./data/savourly.db)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = &args.database_url {
        config.database.url =
            savourly::config::environment::DatabaseUrl::parse_url(database_url);
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Savourly");
    info!("{}", config.summary());

    // Initialize database and run migrations
    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!(
        "Database initialized: {}",
        config.database.url.to_connection_string()
    );

    // JWT secret from the environment, or a fresh one for this process
    let jwt_secret = match &config.auth.jwt_secret {
        Some(secret) => secret.as_bytes().to_vec(),
        None => {
            warn!("JWT_SECRET not set; generating an ephemeral secret (sessions will not survive restarts)");
            generate_jwt_secret().to_vec()
        }
    };

    let auth_manager = AuthManager::new(jwt_secret, config.auth.jwt_expiry_hours);
    info!("Authentication manager initialized");

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config),
    ));
    let server = SavourlyServer::new(resources);

    display_available_endpoints(http_port);
    info!("Ready to serve recipes!");

    if let Err(e) = server.run(http_port).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());

    info!("=== Available API Endpoints ===");
    display_auth_endpoints(&host, port);
    display_recipe_endpoints(&host, port);
    display_discover_endpoints(&host, port);
    display_favorite_endpoints(&host, port);
    display_cooking_log_endpoints(&host, port);
    display_monitoring_endpoints(&host, port);
    info!("=== End of Endpoint List ===");
}

#[allow(clippy::cognitive_complexity)]
fn display_auth_endpoints(host: &str, port: u16) {
    info!("Authentication:");
    info!("   User Registration: POST http://{host}:{port}/api/auth/register");
    info!("   User Login:        POST http://{host}:{port}/api/auth/login");
    info!("   Token Refresh:     POST http://{host}:{port}/api/auth/refresh");
}

#[allow(clippy::cognitive_complexity)]
fn display_recipe_endpoints(host: &str, port: u16) {
    info!("Recipes:");
    info!("   List My Recipes:   GET  http://{host}:{port}/api/recipes");
    info!("   Create Recipe:     POST http://{host}:{port}/api/recipes");
    info!("   Recipe Detail:     GET  http://{host}:{port}/api/recipes/{{id}}?servings=N");
    info!("   Update Recipe:     PUT  http://{host}:{port}/api/recipes/{{id}}");
    info!("   Delete Recipe:     DELETE http://{host}:{port}/api/recipes/{{id}}");
}

#[allow(clippy::cognitive_complexity)]
fn display_discover_endpoints(host: &str, port: u16) {
    info!("Discover:");
    info!("   Discover Feed:     GET  http://{host}:{port}/api/discover");
    info!("   Tag Catalog:       GET  http://{host}:{port}/api/tags");
    info!("   Cuisines:          GET  http://{host}:{port}/api/cuisines");
}

#[allow(clippy::cognitive_complexity)]
fn display_favorite_endpoints(host: &str, port: u16) {
    info!("Favorites:");
    info!("   Add Bookmark:      POST http://{host}:{port}/api/recipes/{{id}}/favorite");
    info!("   Remove Bookmark:   DELETE http://{host}:{port}/api/recipes/{{id}}/favorite");
    info!("   List Bookmarks:    GET  http://{host}:{port}/api/favorites");
}

#[allow(clippy::cognitive_complexity)]
fn display_cooking_log_endpoints(host: &str, port: u16) {
    info!("Cooking Logs:");
    info!("   List Logs:         GET  http://{host}:{port}/api/recipes/{{id}}/logs");
    info!("   Add Log:           POST http://{host}:{port}/api/recipes/{{id}}/logs");
    info!("   Edit Log:          PUT  http://{host}:{port}/api/logs/{{id}}");
    info!("   Delete Log:        DELETE http://{host}:{port}/api/logs/{{id}}");
}

fn display_monitoring_endpoints(host: &str, port: u16) {
    info!("Monitoring:");
    info!("   Health Check:      GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
}
