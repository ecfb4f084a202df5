use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::blog::{CommentRequest, CreateBlogRequest, UpdateBlogRequest};
use common::{BlogResponse, BlogStats};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{blog, comment, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::blog::*;
use crate::models::shared::normalize_optional_text;
use crate::state::AppState;
use crate::utils::blog::{build_blog_response, find_blog, load_all_blogs};

#[utoipa::path(
    get,
    path = "/",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List all blogs",
    description = "Returns every blog in insertion order, each with its owner and comments.",
    responses(
        (status = 200, description = "All blogs", body = Vec<BlogResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogResponse>>, AppError> {
    Ok(Json(load_all_blogs(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "Blogs",
    operation_id = "blogStats",
    summary = "Aggregate statistics over all blogs",
    description = "Returns the blog count, the total number of likes and the most liked blog (`null` when there are no blogs; the earliest blog wins ties).",
    responses(
        (status = 200, description = "Blog statistics", body = BlogStats),
    ),
)]
#[instrument(skip(state))]
pub async fn blog_stats(State(state): State<AppState>) -> Result<Json<BlogStats>, AppError> {
    let blogs = load_all_blogs(&state.db).await?;
    Ok(Json(BlogStats::from_blogs(&blogs)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "getBlog",
    summary = "Get a blog by ID",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog details", body = BlogResponse),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlogResponse>, AppError> {
    let model = find_blog(&state.db, id).await?;
    Ok(Json(build_blog_response(&state.db, model).await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a new blog",
    description = "Creates a blog owned by the authenticated user. `title` and `url` are required; `likes` defaults to 0.",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn create_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_blog = NewBlog::try_from(&payload)?;

    // The token may outlive its user record.
    user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    let model = blog::ActiveModel {
        title: Set(new_blog.title),
        author: Set(new_blog.author),
        url: Set(new_blog.url),
        likes: Set(new_blog.likes),
        user_id: Set(auth_user.user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!(blog_id = model.id, username = %auth_user.username, "Blog created");

    let response = build_blog_response(&state.db, model).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Update an existing blog",
    description = "Updates any of `title`, `author`, `url` and `likes`. Other fields in the body (such as `id` or `user`) are ignored, so the owner never changes. An empty payload returns the current blog unchanged.",
    params(("id" = i32, Path, description = "Blog ID")),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    validate_update_blog(&payload)?;

    if payload == UpdateBlogRequest::default() {
        let existing = find_blog(&state.db, id).await?;
        return Ok(Json(build_blog_response(&state.db, existing).await?));
    }

    let txn = state.db.begin().await?;

    let existing = find_blog(&txn, id).await?;
    let mut active: blog::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(ref author) = payload.author {
        active.author = Set(normalize_optional_text(Some(author)));
    }
    if let Some(ref url) = payload.url {
        active.url = Set(url.trim().to_string());
    }
    if let Some(likes) = payload.likes {
        active.likes = Set(likes);
    }

    let model = active.update(&txn).await?;
    let response = build_blog_response(&txn, model).await?;
    txn.commit().await?;

    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog by ID",
    description = "Permanently deletes a blog and its comments. Only the user who created the blog may delete it.",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the creator (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, user_id = auth_user.user_id))]
pub async fn delete_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let existing = find_blog(&txn, id).await?;
    auth_user.require_owner(&existing)?;

    comment::Entity::delete_many()
        .filter(comment::Column::BlogId.eq(id))
        .exec(&txn)
        .await?;
    blog::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/comments",
    tag = "Blogs",
    operation_id = "addComment",
    summary = "Comment on a blog",
    description = "Appends an anonymous comment to a blog and returns the updated blog.",
    params(("id" = i32, Path, description = "Blog ID")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment added", body = BlogResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<CommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_comment(&payload)?;

    let txn = state.db.begin().await?;
    let existing = find_blog(&txn, id).await?;

    comment::ActiveModel {
        content: Set(payload.comment.trim().to_string()),
        blog_id: Set(existing.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let response = build_blog_response(&txn, existing).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(response)))
}
