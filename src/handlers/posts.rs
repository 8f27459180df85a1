//! Post Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::error::ApiError;
use crate::extractors::{AuthUser, Json};
use crate::models::{CreatePostRequest, MessageResponse, PostQuery, UpdatePostRequest};
use crate::AppState;

/// GET /api/posts - List posts, newest first
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let posts = state.posts.list(&query).await?;
    Ok(Json(posts))
}

/// GET /api/posts/:id - Get a post with its author
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.get(id).await?;
    Ok(Json(post))
}

/// POST /api/posts - Create a new post
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let post = state.posts.create(user.id, req).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/posts/:id - Update an owned post
pub async fn update_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let post = state.posts.update(id, user.id, req).await?;

    Ok(Json(post))
}

/// DELETE /api/posts/:id - Delete an owned post
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.posts.delete(id, user.id).await?;

    Ok(Json(MessageResponse::new("Post deleted successfully")))
}
