use serde::{Deserialize, Serialize};

/// Owner of a blog as embedded in blog responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogOwner {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: String,
}

/// A blog as returned by every blog endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogResponse {
    /// Store-assigned identifier.
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Canonical string reduction")]
    pub title: String,
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: Option<String>,
    #[schema(example = "http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html")]
    pub url: String,
    #[schema(example = 12)]
    pub likes: i32,
    pub user: BlogOwner,
    /// Comments in the order they were added.
    #[schema(example = json!(["great read"]))]
    pub comments: Vec<String>,
}

/// Request body for creating a blog.
///
/// `title` and `url` are optional here only so that their absence surfaces as
/// a validation error instead of a deserialization error.
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateBlogRequest {
    #[schema(example = "Type wars")]
    pub title: Option<String>,
    #[schema(example = "Robert C. Martin")]
    pub author: Option<String>,
    #[schema(example = "http://blog.cleancoder.com/uncle-bob/2016/05/01/TypeWars.html")]
    pub url: Option<String>,
    /// Defaults to 0 when omitted.
    #[schema(example = 2)]
    pub likes: Option<i32>,
}

/// Request body for updating a blog. Absent fields are left untouched;
/// unknown fields such as `id` or `user` are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateBlogRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "google.fi")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 100)]
    pub likes: Option<i32>,
}

/// Request body for commenting on a blog.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CommentRequest {
    #[schema(example = "great read")]
    pub comment: String,
}
