pub mod blog;
pub mod list_helper;
pub mod user;

pub use blog::{BlogOwner, BlogResponse};
pub use list_helper::{BlogStats, FavoriteBlog, favorite_blog, total_likes};
