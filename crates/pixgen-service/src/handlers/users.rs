//! Registration and login handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use pixgen_core::User;
use pixgen_store::Store;

use crate::auth::{hash_password, issue_token, verify_password};
use crate::error::ApiError;
use crate::state::AppState;

/// User summary echoed in auth and balance responses.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    /// Display name.
    pub name: String,
}

/// Auth response carrying a fresh access token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Always true on this path.
    pub success: bool,
    /// Signed access token.
    pub token: String,
    /// The authenticated user.
    pub user: UserSummary,
}

/// Registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: Option<String>,
    /// Email address, unique per account.
    pub email: Option<String>,
    /// Plaintext password, hashed before storage.
    pub password: Option<String>,
}

/// Register a new account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (name, email, password) = match (&body.name, &body.email, &body.password) {
        (Some(name), Some(email), Some(password))
            if !name.trim().is_empty() && !email.trim().is_empty() && !password.is_empty() =>
        {
            (name.trim(), email.trim(), password.as_str())
        }
        _ => {
            return Err(ApiError::BadRequest(
                "name, email and password are required".into(),
            ))
        }
    };

    let password_hash = hash_password(password)?;
    let user = User::new(name, email, password_hash, state.config.signup_credits);

    state.store.create_user(&user)?;

    let token = issue_token(&user.id, &state.config)?;

    tracing::info!(
        user_id = %user.id,
        starting_credits = %user.credit_balance,
        "User registered"
    );

    Ok(Json(AuthResponse {
        success: true,
        token,
        user: UserSummary { name: user.name },
    }))
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// Log into an existing account.
///
/// Unknown email and wrong password return the same error so the
/// response does not reveal which one was wrong.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (email, password) = match (&body.email, &body.password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            (email.trim(), password.as_str())
        }
        _ => return Err(ApiError::BadRequest("email and password are required".into())),
    };

    let user = state
        .store
        .get_user_by_email(email)?
        .ok_or(ApiError::Unauthorized)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(ApiError::Unauthorized);
    }

    let token = issue_token(&user.id, &state.config)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        success: true,
        token,
        user: UserSummary { name: user.name },
    }))
}
