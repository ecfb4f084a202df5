use clap::{Args, Subcommand};
use common::user::CreateUserRequest;
use dialoguer::Password;

use super::{author_or_unknown, print_json};
use crate::OutputFormat;
use crate::api::BlogClient;

#[derive(Args, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users and how many blogs each has added.
    List,
    /// Show one user and the blogs they added.
    Show { id: i32 },
    /// Register a new user. The password is prompted for.
    Create {
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "")]
        name: String,
    },
}

pub fn run(client: &BlogClient, args: &UsersArgs, format: OutputFormat) -> anyhow::Result<()> {
    match &args.command {
        UsersCommand::List => {
            let users = client.list_users()?;
            match format {
                OutputFormat::Json => print_json(&users)?,
                OutputFormat::Text => {
                    println!("{:>5}  {:<24} blogs created", "id", "name");
                    for user in &users {
                        println!("{:>5}  {:<24} {}", user.id, user.name, user.blogs.len());
                    }
                }
            }
        }
        UsersCommand::Show { id } => {
            let user = client.get_user(*id)?;
            match format {
                OutputFormat::Json => print_json(&user)?,
                OutputFormat::Text => {
                    println!("{} ({})", console::style(&user.name).bold(), user.username);
                    println!("added blogs");
                    for blog in &user.blogs {
                        println!(
                            "  - {} {}",
                            blog.title,
                            author_or_unknown(blog.author.as_deref())
                        );
                    }
                }
            }
        }
        UsersCommand::Create { username, name } => {
            let password = Password::new()
                .with_prompt("password")
                .with_confirmation("repeat password", "passwords do not match")
                .interact()?;
            let user = client.create_user(&CreateUserRequest {
                username: username.clone(),
                name: name.clone(),
                password,
            })?;
            match format {
                OutputFormat::Json => print_json(&user)?,
                OutputFormat::Text => println!("Created user {} (id {}).", user.username, user.id),
            }
        }
    }
    Ok(())
}
