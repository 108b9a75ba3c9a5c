//! Authentication Handlers
//!
//! Handles login and current-user lookup

use std::time::Duration;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse, UserInfo};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 250;

/// POST /api/auth/login
///
/// Authenticates staff credentials and returns a JWT token. The error
/// message is identical for unknown users and wrong passwords so usernames
/// cannot be enumerated.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let account = state.find_staff(&req.username).cloned();

    // Fixed delay before checking the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(account) => {
            let parsed = PasswordHash::new(&account.password_hash)
                .map_err(|e| AppError::internal(format!("Corrupt password hash: {}", e)))?;

            if Argon2::default()
                .verify_password(req.password.as_bytes(), &parsed)
                .is_err()
            {
                tracing::warn!(username = %req.username, "login failed - invalid credentials");
                return Err(AppError::unauthorized("Invalid credentials"));
            }
            account
        }
        None => {
            tracing::warn!(username = %req.username, "login failed - user not found");
            return Err(AppError::unauthorized("Invalid credentials"));
        }
    };

    let token = state
        .jwt_service
        .generate_token(&account.id, &account.username, &account.name, &account.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(username = %account.username, role = %account.role, "login success");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: account.id,
            username: account.username,
            name: account.name,
            role: account.role,
        },
    }))
}

/// GET /api/auth/me - 当前登录用户信息
pub async fn me(user: CurrentUser) -> Json<UserInfo> {
    Json(UserInfo {
        id: user.id,
        username: user.username,
        name: user.name,
        role: user.role,
    })
}
