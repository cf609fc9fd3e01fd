// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: Provides REST endpoints for account creation and JWT sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! Authentication routes for user management
//!
//! Handles user registration, login, and token refresh. Handlers are thin
//! wrappers that delegate to [`AuthService`].

use crate::{
    errors::{AppError, AppResult},
    i18n::{self, Locale, MessageKey},
    models::User,
    server::ServerResources,
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use savourly_core::constants::limits;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User info for login response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// User login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub jwt_token: String,
    pub expires_at: String,
    pub user: UserInfo,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub token: String,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle user registration
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the email is taken, or the
    /// database operation fails
    pub async fn register(
        &self,
        request: RegisterRequest,
        locale: Locale,
    ) -> AppResult<RegisterResponse> {
        tracing::info!("User registration attempt for email: {}", request.email);

        if !Self::is_valid_email(&request.email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }

        if !Self::is_valid_password(&request.password) {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {} characters",
                limits::MIN_PASSWORD_LENGTH
            )));
        }

        if let Ok(Some(_)) = self
            .resources
            .database
            .get_user_by_email(&request.email)
            .await
        {
            return Err(AppError::already_exists("A user with this email already exists"));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let display_name = request
            .display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());
        let user = User::new(request.email.clone(), password_hash, display_name);

        let user_id = self
            .resources
            .database
            .create_user(&user)
            .await
            .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        tracing::info!(
            "User registered successfully: {} ({})",
            request.email,
            user_id
        );

        Ok(RegisterResponse {
            user_id: user_id.to_string(),
            message: i18n::message(locale, MessageKey::RegistrationSuccess).to_owned(),
        })
    }

    /// Handle user login
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails or token generation fails
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        tracing::info!("User login attempt for email: {}", request.email);

        let user = self
            .resources
            .database
            .get_user_by_email_required(&request.email)
            .await
            .map_err(|_| AppError::auth_invalid("Invalid email or password"))?;

        // Verify password on spawn_blocking to keep bcrypt off the async
        // executor
        let password = request.password.clone();
        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            tracing::warn!("Invalid password for user: {}", request.email);
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        if !user.is_active {
            tracing::warn!("Login blocked for deactivated user: {}", request.email);
            return Err(AppError::auth_invalid("Account is deactivated"));
        }

        self.resources
            .database
            .update_last_active(user.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to update last active: {e}")))?;

        let jwt_token = self
            .resources
            .auth_manager
            .generate_token(&user)
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
        let expires_at = self.resources.auth_manager.expiry_from_now();

        tracing::info!("User logged in successfully: {} ({})", request.email, user.id);

        Ok(LoginResponse {
            jwt_token,
            expires_at: expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email,
                display_name: user.display_name,
            },
        })
    }

    /// Handle token refresh
    ///
    /// # Errors
    ///
    /// Returns an error if the token is invalid or the user is gone
    pub async fn refresh_token(&self, request: RefreshTokenRequest) -> AppResult<LoginResponse> {
        let claims = self.resources.auth_manager.validate_token(&request.token)?;
        let user_id = uuid::Uuid::parse_str(&claims.sub)
            .map_err(|e| AppError::auth_invalid(format!("Invalid user id in token: {e}")))?;

        let user = self
            .resources
            .database
            .get_user(user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load user: {e}")))?
            .ok_or_else(|| AppError::not_found("User"))?;

        let jwt_token = self
            .resources
            .auth_manager
            .generate_token(&user)
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
        let expires_at = self.resources.auth_manager.expiry_from_now();

        self.resources
            .database
            .update_last_active(user.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to update last active: {e}")))?;

        tracing::info!("Token refreshed successfully for user: {}", user.id);

        Ok(LoginResponse {
            jwt_token,
            expires_at: expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email,
                display_name: user.display_name,
            },
        })
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.')
    }

    /// Validate password strength
    #[must_use]
    pub const fn is_valid_password(password: &str) -> bool {
        password.len() >= limits::MIN_PASSWORD_LENGTH
    }
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/refresh", post(Self::handle_refresh))
            .with_state(resources)
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let locale = Locale::from_headers(&headers);
        let service = AuthService::new(resources);
        let response = service.register(body, locale).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService::new(resources);
        let response = service.login(body).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/auth/refresh
    async fn handle_refresh(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RefreshTokenRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService::new(resources);
        let response = service.refresh_token(body).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
