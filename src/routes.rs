//! HTTP routing

use crate::auth::{self, token_extractor, user_extractor};
use crate::blogs::api as blogs_api;
use crate::error::ErrorBody;
use crate::middleware::request_logging;
use crate::state::AppState;
use crate::users::api as users_api;
use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    // Routes that need a resolved user
    let protected_routes = Router::new()
        .route("/api/blogs", post(blogs_api::create_blog))
        .route("/api/blogs/:id", delete(blogs_api::delete_blog))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            user_extractor,
        ));

    let public_routes = Router::new()
        .route("/api/blogs", get(blogs_api::list_blogs))
        .route(
            "/api/blogs/:id",
            get(blogs_api::get_blog).put(blogs_api::update_blog),
        )
        .route(
            "/api/users",
            get(users_api::list_users).post(users_api::create_user),
        )
        .route("/api/login", post(auth::api::login));

    // user_extractor only wraps the protected method routes
    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .fallback(unknown_endpoint)
        .with_state(state)
        .layer(middleware::from_fn(token_extractor))
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

async fn unknown_endpoint() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "unknown endpoint".to_string(),
            fields: None,
        }),
    )
}
