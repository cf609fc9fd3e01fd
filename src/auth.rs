// ABOUTME: JWT-based user authentication and session management
// ABOUTME: Handles token generation, validation, and request authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savourly Project

//! # Authentication and Session Management
//!
//! JWT-based (HS256) authentication for the Savourly service. Tokens carry
//! the user id and email; requests authenticate via an `Authorization`
//! bearer header or an `auth_token` cookie.

use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::server::ServerResources;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Number of random bytes in a generated JWT secret
const JWT_SECRET_LEN: usize = 64;

/// Generate a random JWT signing secret
#[must_use]
pub fn generate_jwt_secret() -> [u8; JWT_SECRET_LEN] {
    use rand::Rng;
    let mut secret = [0u8; JWT_SECRET_LEN];
    rand::thread_rng().fill(&mut secret);
    secret
}

/// JWT validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper JWT format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => {
                let expired_for = current_time.signed_duration_since(*expired_at);
                write!(
                    f,
                    "JWT token expired {} minutes ago at {}",
                    expired_for.num_minutes(),
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            JwtValidationError::TokenInvalid { reason } => Self::auth_invalid(reason),
            JwtValidationError::TokenMalformed { details } => Self::auth_invalid(details),
        }
    }
}

/// JWT claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp (milliseconds, made unique per token)
    pub iat: i64,
    /// Expiration timestamp (seconds)
    pub exp: i64,
}

/// Authentication result with user context
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated user ID
    pub user_id: Uuid,
    /// Authenticated user email
    pub email: String,
}

/// Authentication manager for JWT tokens and user sessions
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    token_expiry_hours: i64,
    /// Monotonic counter to ensure unique issued-at values for tokens
    token_counter: AtomicU64,
}

impl Clone for AuthManager {
    fn clone(&self) -> Self {
        Self {
            jwt_secret: self.jwt_secret.clone(),
            token_expiry_hours: self.token_expiry_hours,
            // Each instance maintains uniqueness independently
            token_counter: AtomicU64::new(0),
        }
    }
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub const fn new(jwt_secret: Vec<u8>, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_expiry_hours,
            token_counter: AtomicU64::new(0),
        }
    }

    /// When a token generated right now will expire
    #[must_use]
    pub fn expiry_from_now(&self) -> DateTime<Utc> {
        Utc::now() + Duration::hours(self.token_expiry_hours)
    }

    /// Generate a JWT token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> anyhow::Result<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        // Atomic counter keeps issued-at unique when tokens are generated
        // within the same millisecond
        let counter = self.token_counter.fetch_add(1, Ordering::Relaxed);
        let unique_iat =
            now.timestamp() * 1000 + i64::from(u32::try_from(counter % 1000).unwrap_or(0));

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: unique_iat,
            exp: expiry.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )?;

        Ok(token)
    }

    /// Validate a JWT token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a detailed [`JwtValidationError`] when the token is expired,
    /// has an invalid signature, or is not a well-formed JWT.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let key = DecodingKey::from_secret(&self.jwt_secret);
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Claims>(token, &key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(error) => match error.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    // Decode again without expiry validation to report when
                    // the token actually expired
                    let mut no_exp = Validation::new(Algorithm::HS256);
                    no_exp.validate_exp = false;
                    let expired_at = decode::<Claims>(token, &key, &no_exp)
                        .ok()
                        .and_then(|data| DateTime::from_timestamp(data.claims.exp, 0))
                        .unwrap_or_default();
                    Err(JwtValidationError::TokenExpired {
                        expired_at,
                        current_time: Utc::now(),
                    })
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    Err(JwtValidationError::TokenInvalid {
                        reason: "signature mismatch".to_owned(),
                    })
                }
                _ => Err(JwtValidationError::TokenMalformed {
                    details: error.to_string(),
                }),
            },
        }
    }
}

/// Extract a cookie value from request headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get("cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

/// Authenticate a request from its headers
///
/// Accepts `Authorization: Bearer <jwt>` or an `auth_token` cookie. The
/// token's user must still exist and be active.
///
/// # Errors
///
/// Returns an authentication error when no credentials are present, the
/// token fails validation, or the user is gone or deactivated.
pub async fn authenticate_request(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<AuthResult> {
    let token = bearer_token(headers)
        .or_else(|| get_cookie_value(headers, "auth_token"))
        .ok_or_else(AppError::auth_required)?;

    let claims = resources.auth_manager.validate_token(&token)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|e| AppError::auth_invalid(format!("Invalid user id in token: {e}")))?;

    let user = resources
        .database
        .get_user(user_id)
        .await
        .map_err(|e| AppError::database(format!("Failed to load user {user_id}: {e}")))?
        .ok_or_else(|| AppError::auth_invalid("Token user no longer exists"))?;

    if !user.is_active {
        return Err(AppError::auth_invalid("Account is deactivated"));
    }

    Ok(AuthResult {
        user_id,
        email: user.email,
    })
}

/// Authenticate a request when credentials are optional
///
/// Anonymous requests (no bearer header, no cookie) yield `None`; presented
/// credentials must still be valid.
///
/// # Errors
///
/// Returns an error only when credentials are present but invalid.
pub async fn authenticate_optional(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<Option<AuthResult>> {
    if bearer_token(headers).is_none() && get_cookie_value(headers, "auth_token").is_none() {
        return Ok(None);
    }
    authenticate_request(headers, resources).await.map(Some)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_owned())
}
