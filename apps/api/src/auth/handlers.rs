//! Axum route handlers for signup and login.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::AuthError;
use crate::errors::{AppError, AppJson};
use crate::models::user::{PublicUser, User};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

/// Treats absent and empty strings the same way.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    AppJson(request): AppJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let (Some(email), Some(password), Some(name)) = (
        non_empty(request.email),
        non_empty(request.password),
        non_empty(request.name),
    ) else {
        return Err(AppError::Validation(
            "Email, password, and name are required".to_string(),
        ));
    };

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    // insert() re-checks under the write lock.
    if state.users.exists(&email).await {
        return Err(AuthError::UserExists.into());
    }

    let password_hash = hash_password(&password, state.config.bcrypt_cost).await?;
    let user = User {
        id: Uuid::new_v4(),
        email,
        password_hash,
        name,
        created_at: Utc::now(),
    };

    let token = state.tokens.issue(&user)?;
    let public = PublicUser::from(&user);
    let created_at = user.created_at;
    state.users.insert(user).await?;
    info!(user_id = %public.id, %created_at, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: public,
        }),
    ))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (Some(email), Some(password)) = (non_empty(request.email), non_empty(request.password))
    else {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    };

    let user = state
        .users
        .find_by_email(&email)
        .await
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(&password, &user.password_hash).await? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.tokens.issue(&user)?;
    info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: PublicUser::from(&user),
    }))
}
