use common::blog::{CommentRequest, CreateBlogRequest, UpdateBlogRequest};

use crate::error::AppError;

use super::shared::{normalize_optional_text, validate_required_text};

pub const TITLE_MAX: usize = 256;
pub const AUTHOR_MAX: usize = 256;
pub const URL_MAX: usize = 2048;
pub const COMMENT_MAX: usize = 1000;

fn validate_likes(likes: i32) -> Result<(), AppError> {
    if likes < 0 {
        return Err(AppError::Validation("Likes must not be negative".into()));
    }
    Ok(())
}

fn validate_author(author: Option<&str>) -> Result<(), AppError> {
    if let Some(author) = author
        && author.trim().chars().count() > AUTHOR_MAX
    {
        return Err(AppError::Validation(format!(
            "Author must be at most {AUTHOR_MAX} characters"
        )));
    }
    Ok(())
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

pub fn validate_create_blog(req: &CreateBlogRequest) -> Result<(), AppError> {
    validate_required_text(required(req.title.as_deref(), "Title")?, "Title", TITLE_MAX)?;
    validate_required_text(required(req.url.as_deref(), "Url")?, "Url", URL_MAX)?;

    validate_author(req.author.as_deref())?;
    if let Some(likes) = req.likes {
        validate_likes(likes)?;
    }
    Ok(())
}

/// Trimmed, defaulted fields of a blog about to be inserted.
#[derive(Debug, PartialEq, Eq)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i32,
}

impl TryFrom<&CreateBlogRequest> for NewBlog {
    type Error = AppError;

    fn try_from(req: &CreateBlogRequest) -> Result<Self, Self::Error> {
        validate_create_blog(req)?;
        Ok(Self {
            title: required(req.title.as_deref(), "Title")?.trim().to_string(),
            author: normalize_optional_text(req.author.as_deref()),
            url: required(req.url.as_deref(), "Url")?.trim().to_string(),
            likes: req.likes.unwrap_or(0),
        })
    }
}

pub fn validate_update_blog(req: &UpdateBlogRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_required_text(title, "Title", TITLE_MAX)?;
    }
    if let Some(ref url) = req.url {
        validate_required_text(url, "Url", URL_MAX)?;
    }
    validate_author(req.author.as_deref())?;
    if let Some(likes) = req.likes {
        validate_likes(likes)?;
    }
    Ok(())
}

pub fn validate_comment(req: &CommentRequest) -> Result<(), AppError> {
    validate_required_text(&req.comment, "Comment", COMMENT_MAX)
}
