use serde::{Deserialize, Serialize};

/// Request body for creating a user.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    /// Unique username (3-32 characters).
    #[schema(example = "mluukkai")]
    pub username: String,
    /// Display name.
    #[serde(default)]
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
    /// Password (3-128 characters).
    #[schema(example = "salainen")]
    pub password: String,
}

/// Blog summary listed under its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserBlog {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Canonical string reduction")]
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    #[schema(example = 12)]
    pub likes: i32,
}

/// A user together with the blogs they have added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
    pub blogs: Vec<UserBlog>,
}

/// Request body for logging in.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "salainen")]
    pub password: String,
}

/// Successful login response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Bearer token for mutating requests.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
}
