pub mod auth;
pub mod blogs;
pub mod browse;
pub mod users;

use std::time::Instant;

use common::BlogResponse;
use serde::Serialize;

pub use crate::notification::author_or_unknown;
use crate::notification::{Action, Notification};

/// Show a one-off notification for a single command run.
pub fn announce(action: Action) {
    let now = Instant::now();
    let mut notification = Notification::Idle;
    notification.dispatch(action, now);
    notification.render(now);
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn blog_line(blog: &BlogResponse) -> String {
    format!(
        "{title} {author}  ({likes} likes)",
        title = blog.title,
        author = author_or_unknown(blog.author.as_deref()),
        likes = blog.likes,
    )
}

pub fn print_blog_detail(blog: &BlogResponse) {
    println!(
        "{} {}",
        console::style(&blog.title).bold(),
        author_or_unknown(blog.author.as_deref())
    );
    println!("  {}", blog.url);
    println!("  likes: {}", blog.likes);
    println!("  added by {}", blog.user.name);
    println!("  comments:");
    if blog.comments.is_empty() {
        println!("    no comments yet");
    }
    for comment in &blog.comments {
        println!("    - {comment}");
    }
}
