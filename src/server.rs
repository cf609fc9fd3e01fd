// ABOUTME: Server resources and router assembly for the Savourly service
// ABOUTME: Wires domain routers together with tracing, CORS, and timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Server composition
//!
//! [`ServerResources`] bundles the shared dependencies every route handler
//! needs; [`SavourlyServer`] assembles the domain routers and runs them.

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::routes::{
    AuthRoutes, CookingLogRoutes, DiscoverRoutes, FavoriteRoutes, HealthRoutes, RecipeRoutes,
};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Request timeout for all routes
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared dependencies injected into every route handler
pub struct ServerResources {
    /// Database connection pool and managers
    pub database: Database,
    /// JWT authentication manager
    pub auth_manager: AuthManager,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create server resources
    #[must_use]
    pub const fn new(
        database: Database,
        auth_manager: AuthManager,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database,
            auth_manager,
            config,
        }
    }
}

/// The Savourly HTTP server
pub struct SavourlyServer {
    resources: Arc<ServerResources>,
}

impl SavourlyServer {
    /// Create a new server from shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes())
            .merge(AuthRoutes::routes(self.resources.clone()))
            .merge(RecipeRoutes::routes(self.resources.clone()))
            .merge(DiscoverRoutes::routes(self.resources.clone()))
            .merge(FavoriteRoutes::routes(self.resources.clone()))
            .merge(CookingLogRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
    }

    /// Run the server until ctrl-c
    ///
    /// # Errors
    ///
    /// Returns an error if binding the listener or serving fails
    pub async fn run(&self, port: u16) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install ctrl-c handler: {e}");
        return;
    }
    info!("Shutdown signal received");
}
