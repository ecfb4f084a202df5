use clap::{Args, Subcommand};
use common::BlogResponse;
use common::blog::CreateBlogRequest;
use dialoguer::Confirm;

use super::{announce, author_or_unknown, blog_line, print_blog_detail, print_json};
use crate::OutputFormat;
use crate::api::{BlogClient, ClientError};
use crate::notification::Action;
use crate::session::Session;

#[derive(Args, Debug)]
pub struct BlogsArgs {
    #[command(subcommand)]
    pub command: BlogsCommand,
}

#[derive(Subcommand, Debug)]
pub enum BlogsCommand {
    /// List all blogs, most liked first.
    List,
    /// Show one blog with its comments.
    Show {
        id: i32,
    },
    /// Add a blog. Requires login.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        url: String,
        #[arg(long)]
        likes: Option<i32>,
    },
    /// Like a blog.
    Like {
        id: i32,
    },
    /// Remove a blog you added.
    Delete {
        id: i32,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Comment on a blog.
    Comment {
        id: i32,
        text: String,
    },
    /// Like count summary and the favorite blog.
    Stats,
}

/// Most liked first; equal counts keep server order.
pub fn sorted_by_likes(mut blogs: Vec<BlogResponse>) -> Vec<BlogResponse> {
    blogs.sort_by(|a, b| b.likes.cmp(&a.likes));
    blogs
}

/// Only the user who added a blog is offered its removal.
pub fn can_remove(blog: &BlogResponse, session: Option<&Session>) -> bool {
    session.is_some_and(|s| s.username == blog.user.username)
}

/// The notification for a like that hit a removed blog, if `err` is a 404.
/// Names the blog by title when it was fetched before it disappeared.
pub fn removed_blog_notice(
    id: i32,
    fetched: Option<&BlogResponse>,
    err: &ClientError,
) -> Option<Action> {
    if !err.is_not_found() {
        return None;
    }
    Some(match fetched {
        Some(blog) => Action::blog_already_removed(&blog.title, blog.author.as_deref()),
        None => Action::blog_id_already_removed(id),
    })
}

fn require_session(session: Option<&Session>) -> anyhow::Result<&Session> {
    session.ok_or_else(|| anyhow::anyhow!("Not logged in. Run `blogilista login` first."))
}

pub fn run(
    client: &BlogClient,
    session: Option<&Session>,
    args: &BlogsArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match &args.command {
        BlogsCommand::List => {
            let blogs = sorted_by_likes(client.list_blogs()?);
            match format {
                OutputFormat::Json => print_json(&blogs)?,
                OutputFormat::Text => {
                    for blog in &blogs {
                        println!("{:>5}  {}", blog.id, blog_line(blog));
                    }
                }
            }
        }
        BlogsCommand::Show { id } => {
            let blog = client.get_blog(*id)?;
            match format {
                OutputFormat::Json => print_json(&blog)?,
                OutputFormat::Text => print_blog_detail(&blog),
            }
        }
        BlogsCommand::Create {
            title,
            author,
            url,
            likes,
        } => {
            require_session(session)?;
            let req = CreateBlogRequest {
                title: Some(title.clone()),
                author: author.clone(),
                url: Some(url.clone()),
                likes: *likes,
            };
            let blog = client.create_blog(&req)?;
            match format {
                OutputFormat::Json => print_json(&blog)?,
                OutputFormat::Text => {
                    announce(Action::blog_created(&blog.title, blog.author.as_deref()))
                }
            }
        }
        BlogsCommand::Like { id } => {
            let blog = match client.get_blog(*id) {
                Ok(blog) => blog,
                Err(e) => {
                    if let Some(action) = removed_blog_notice(*id, None, &e) {
                        announce(action);
                    }
                    return Err(e.into());
                }
            };
            match client.like_blog(&blog) {
                Ok(updated) => println!("{}", blog_line(&updated)),
                Err(e) => {
                    if let Some(action) = removed_blog_notice(blog.id, Some(&blog), &e) {
                        announce(action);
                    }
                    return Err(e.into());
                }
            }
        }
        BlogsCommand::Delete { id, yes } => {
            let session = require_session(session)?;
            let blog = client.get_blog(*id)?;
            if !can_remove(&blog, Some(session)) {
                anyhow::bail!("Only {} can remove '{}'", blog.user.name, blog.title);
            }
            let confirmed = *yes
                || Confirm::new()
                    .with_prompt(format!(
                        "Remove blog {} by {}",
                        blog.title,
                        author_or_unknown(blog.author.as_deref())
                    ))
                    .default(false)
                    .interact()?;
            if confirmed {
                client.delete_blog(blog.id)?;
                println!("Removed '{}'.", blog.title);
            }
        }
        BlogsCommand::Comment { id, text } => {
            let blog = client.add_comment(*id, text)?;
            match format {
                OutputFormat::Json => print_json(&blog)?,
                OutputFormat::Text => print_blog_detail(&blog),
            }
        }
        BlogsCommand::Stats => {
            let stats = client.blog_stats()?;
            match format {
                OutputFormat::Json => print_json(&stats)?,
                OutputFormat::Text => {
                    println!("blogs:       {}", stats.blog_count);
                    println!("total likes: {}", stats.total_likes);
                    match &stats.favorite {
                        Some(fav) => println!(
                            "favorite:    {} by {} ({} likes)",
                            fav.title,
                            author_or_unknown(fav.author.as_deref()),
                            fav.likes
                        ),
                        None => println!("favorite:    none"),
                    }
                }
            }
        }
    }
    Ok(())
}
