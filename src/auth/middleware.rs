//! Authentication Middleware
//! Mission: Pull bearer tokens off requests and resolve them to users
//!
//! Two stages:
//! - [`token_extractor`] runs on every request and only records the token.
//! - [`user_extractor`] runs on protected routes, verifies the token and
//!   attaches the owning [`User`] for handlers to pick up via [`CurrentUser`].

use crate::auth::models::BearerToken;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::models::User;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token part of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(|t| t.to_string())
}

/// Records the bearer token (or its absence) on the request. Never rejects.
pub async fn token_extractor(mut req: Request, next: Next) -> Response {
    let token = bearer_token(req.headers());
    req.extensions_mut().insert(BearerToken(token));
    next.run(req).await
}

/// Verifies the recorded token and attaches the user it names.
pub async fn user_extractor(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .extensions()
        .get::<BearerToken>()
        .and_then(|t| t.0.clone())
        .ok_or(ApiError::Unauthorized("token missing"))?;

    let claims = state.tokens.verify(&token)?;

    let user_id = Uuid::parse_str(&claims.id).map_err(|_| {
        warn!("Token carries a malformed user id: {}", claims.id);
        ApiError::Unauthorized("token invalid")
    })?;

    let user = state.users.find_by_id(user_id)?.ok_or_else(|| {
        warn!("Token references unknown user {}", user_id);
        ApiError::Unauthorized("token invalid")
    })?;

    debug!("Authenticated request as {}", user.username);
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// The user resolved by [`user_extractor`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized("token missing"))
    }
}
