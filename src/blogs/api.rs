//! Blog API Endpoints
//! Mission: List, read, create, update and delete blog entries

use crate::auth::middleware::CurrentUser;
use crate::blogs::models::{BlogView, CreateBlogRequest, UpdateBlogRequest};
use crate::error::ApiError;
use crate::extract::{JsonBody, PathId};
use crate::state::AppState;
use crate::users::models::UserSummary;
use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, warn};

/// GET /api/blogs
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogView>>, ApiError> {
    Ok(Json(state.blogs.list_views()?))
}

/// GET /api/blogs/:id
pub async fn get_blog(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<BlogView>, ApiError> {
    let blog = state.blogs.find_view(id)?.ok_or(ApiError::NotFound("blog"))?;
    Ok(Json(blog))
}

/// POST /api/blogs (authenticated)
pub async fn create_blog(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(payload): JsonBody<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogView>), ApiError> {
    let new_blog = payload.validate()?;
    let blog = state.blogs.create(new_blog, Some(user.id))?;

    info!("{} added blog {:?}", user.username, blog.title);

    let view = BlogView {
        id: blog.id.to_string(),
        title: blog.title,
        author: blog.author,
        url: blog.url,
        likes: blog.likes,
        user: Some(UserSummary::from(&user)),
    };
    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /api/blogs/:id
pub async fn update_blog(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(payload): JsonBody<UpdateBlogRequest>,
) -> Result<Json<BlogView>, ApiError> {
    let current = state.blogs.find_by_id(id)?.ok_or(ApiError::NotFound("blog"))?;

    let fields = payload.apply_to(&current)?;
    if !state.blogs.update(id, &fields)? {
        // Deleted between the read and the write
        return Err(ApiError::NotFound("blog"));
    }

    let updated = state.blogs.find_view(id)?.ok_or(ApiError::NotFound("blog"))?;
    Ok(Json(updated))
}

/// DELETE /api/blogs/:id (authenticated, owner only)
pub async fn delete_blog(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId,
) -> Result<StatusCode, ApiError> {

    let Some(blog) = state.blogs.find_by_id(id)? else {
        // Deleting something already gone is not an error
        return Ok(StatusCode::NO_CONTENT);
    };

    if blog.user != Some(user.id) {
        warn!("{} tried to delete blog {} they do not own", user.username, id);
        return Err(ApiError::Unauthorized("only the creator can delete a blog"));
    }

    state.blogs.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
