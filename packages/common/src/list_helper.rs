//! Summary statistics over an already-fetched list of blogs.

use serde::{Deserialize, Serialize};

use crate::blog::BlogResponse;

/// Reduced projection of the most liked blog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FavoriteBlog {
    #[schema(example = "Canonical string reduction")]
    pub title: String,
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: Option<String>,
    #[schema(example = 12)]
    pub likes: i32,
}

impl From<&BlogResponse> for FavoriteBlog {
    fn from(blog: &BlogResponse) -> Self {
        Self {
            title: blog.title.clone(),
            author: blog.author.clone(),
            likes: blog.likes,
        }
    }
}

/// Aggregate view over a blog collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogStats {
    #[schema(example = 5)]
    pub blog_count: usize,
    #[schema(example = 34)]
    pub total_likes: i64,
    /// `null` when the collection is empty.
    pub favorite: Option<FavoriteBlog>,
}

impl BlogStats {
    pub fn from_blogs(blogs: &[BlogResponse]) -> Self {
        Self {
            blog_count: blogs.len(),
            total_likes: total_likes(blogs),
            favorite: favorite_blog(blogs),
        }
    }
}

/// Sum of likes across all blogs. Zero for an empty slice.
pub fn total_likes(blogs: &[BlogResponse]) -> i64 {
    blogs.iter().map(|blog| i64::from(blog.likes)).sum()
}

/// The blog with the most likes, or `None` for an empty slice.
///
/// On ties the earliest blog in slice order wins.
pub fn favorite_blog(blogs: &[BlogResponse]) -> Option<FavoriteBlog> {
    blogs
        .iter()
        .reduce(|max, blog| if blog.likes > max.likes { blog } else { max })
        .map(FavoriteBlog::from)
}
