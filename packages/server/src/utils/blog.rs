use std::collections::HashMap;

use common::{BlogOwner, BlogResponse};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::{blog, comment, user};
use crate::error::AppError;

/// Look up a blog by ID, returning 404 if not found.
pub async fn find_blog<C: ConnectionTrait>(db: &C, id: i32) -> Result<blog::Model, AppError> {
    blog::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))
}

/// Every blog in insertion order, with owners and comments attached.
pub async fn load_all_blogs<C: ConnectionTrait>(db: &C) -> Result<Vec<BlogResponse>, AppError> {
    let blogs = blog::Entity::find()
        .order_by_asc(blog::Column::Id)
        .all(db)
        .await?;
    build_blog_responses(db, blogs).await
}

/// Attach owner and comments to a single blog.
pub async fn build_blog_response<C: ConnectionTrait>(
    db: &C,
    blog: blog::Model,
) -> Result<BlogResponse, AppError> {
    build_blog_responses(db, vec![blog])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("Blog response missing after build".into()))
}

/// Attach owners and comments to a batch of blogs, preserving their order.
pub async fn build_blog_responses<C: ConnectionTrait>(
    db: &C,
    blogs: Vec<blog::Model>,
) -> Result<Vec<BlogResponse>, AppError> {
    if blogs.is_empty() {
        return Ok(vec![]);
    }

    let user_ids: Vec<i32> = blogs.iter().map(|b| b.user_id).collect();
    let blog_ids: Vec<i32> = blogs.iter().map(|b| b.id).collect();

    let owners: HashMap<i32, BlogOwner> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| {
            (
                u.id,
                BlogOwner {
                    id: u.id,
                    username: u.username,
                    name: u.name,
                },
            )
        })
        .collect();

    let mut comments: HashMap<i32, Vec<String>> = HashMap::new();
    for c in comment::Entity::find()
        .filter(comment::Column::BlogId.is_in(blog_ids))
        .order_by_asc(comment::Column::Id)
        .all(db)
        .await?
    {
        comments.entry(c.blog_id).or_default().push(c.content);
    }

    let mut data = Vec::with_capacity(blogs.len());
    for b in blogs {
        let owner = owners
            .get(&b.user_id)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("Owner of blog {} not found", b.id)))?;

        data.push(BlogResponse {
            id: b.id,
            title: b.title,
            author: b.author,
            url: b.url,
            likes: b.likes,
            user: owner,
            comments: comments.remove(&b.id).unwrap_or_default(),
        });
    }

    Ok(data)
}
