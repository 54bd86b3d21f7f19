//! Authentication API Endpoints
//! Mission: Exchange credentials for a bearer token

use crate::auth::models::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;
use axum::{extract::State, Json};
use tracing::{info, warn};

/// Login endpoint - POST /api/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    info!("Login attempt: {}", payload.username);

    let Some(user) = state.users.find_by_username(&payload.username)? else {
        warn!("Failed login attempt (unknown user): {}", payload.username);
        return Err(ApiError::InvalidCredentials);
    };

    if !state.hasher.verify(&payload.password, &user.password_hash)? {
        warn!("Failed login attempt (bad password): {}", payload.username);
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user)?;

    info!("Login successful: {}", user.username);

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}
