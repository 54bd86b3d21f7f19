//! User API Endpoints
//! Mission: Registration and user listing

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;
use crate::users::models::{CreateUserRequest, UserView};
use crate::validation::{FieldError, ValidationErrors};
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, ApiError> {
    Ok(Json(state.users.list_with_blogs()?))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let new_user = payload.validate()?;

    if state.users.find_by_username(&new_user.username)?.is_some() {
        return Err(ValidationErrors::single(FieldError::unique("username")).into());
    }

    let password_hash = state.hasher.hash(&new_user.password)?;
    // A concurrent registration can still win the race; the store reports
    // that as a duplicate too.
    let user = state
        .users
        .create(&new_user.username, new_user.name.as_deref(), &password_hash)?;

    info!("Registered user {}", user.username);

    Ok((StatusCode::CREATED, Json(UserView::new(&user, Vec::new()))))
}
