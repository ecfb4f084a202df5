use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::user::{CreateUserRequest, UserBlog, UserResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{blog, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::user::validate_create_user;
use crate::state::AppState;
use crate::utils::hash;

#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    operation_id = "createUser",
    summary = "Create a user",
    description = "Creates a user with a unique username. The password is stored only as an Argon2 hash.",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Username taken (USERNAME_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_user(&payload)?;

    let username = payload.username.trim().to_string();

    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(&username))
        .count(&state.db)
        .await?;
    if existing > 0 {
        return Err(AppError::UsernameTaken);
    }

    let password_hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user::ActiveModel {
        username: Set(username),
        name: Set(payload.name.trim().to_string()),
        password_hash: Set(password_hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let user = new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("User creation race: unique constraint caught on insert");
            AppError::UsernameTaken
        }
        _ => AppError::from(e),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: vec![],
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List all users",
    description = "Returns every user with the blogs they have added.",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(build_user_responses(&state.db, users).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user by ID",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User with blogs", body = UserResponse),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let model = user::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    build_user_responses(&state.db, vec![model])
        .await?
        .pop()
        .map(Json)
        .ok_or_else(|| AppError::Internal("User response missing after build".into()))
}

/// Attach each user's blogs, in insertion order.
async fn build_user_responses<C: ConnectionTrait>(
    db: &C,
    users: Vec<user::Model>,
) -> Result<Vec<UserResponse>, AppError> {
    if users.is_empty() {
        return Ok(vec![]);
    }

    let user_ids: Vec<i32> = users.iter().map(|u| u.id).collect();

    let mut blogs: HashMap<i32, Vec<UserBlog>> = HashMap::new();
    for b in blog::Entity::find()
        .filter(blog::Column::UserId.is_in(user_ids))
        .order_by_asc(blog::Column::Id)
        .all(db)
        .await?
    {
        blogs.entry(b.user_id).or_default().push(UserBlog {
            id: b.id,
            title: b.title,
            author: b.author,
            url: b.url,
            likes: b.likes,
        });
    }

    Ok(users
        .into_iter()
        .map(|u| UserResponse {
            blogs: blogs.remove(&u.id).unwrap_or_default(),
            id: u.id,
            username: u.username,
            name: u.name,
        })
        .collect())
}
