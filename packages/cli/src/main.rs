//! blogilista CLI
//!
//! A terminal front end for the blog list API.

mod api;
mod commands;
mod notification;
mod session;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use crate::api::BlogClient;
use crate::session::Session;

/// Browse, add, like and comment on blogs from the terminal.
#[derive(Parser, Debug)]
#[command(name = "blogilista", version, about)]
struct Cli {
    /// Blog list server URL.
    #[arg(
        long,
        env = "BLOGILISTA_ENDPOINT",
        default_value = "http://localhost:3003",
        global = true
    )]
    endpoint: String,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and remember the session.
    Login(commands::auth::LoginArgs),
    /// Forget the stored session.
    Logout,
    /// List, add, like, comment on and remove blogs.
    Blogs(commands::blogs::BlogsArgs),
    /// List and create users.
    Users(commands::users::UsersArgs),
    /// Interactive mode.
    Browse,
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let session_path = session::default_path()?;
    let session = Session::load(&session_path)?;
    let client = BlogClient::new(&cli.endpoint, session.as_ref().map(|s| s.token.clone()))?;

    match cli.command {
        Command::Login(args) => commands::auth::login(&client, &args, &session_path),
        Command::Logout => commands::auth::logout(&session_path),
        Command::Blogs(args) => {
            commands::blogs::run(&client, session.as_ref(), &args, cli.format)
        }
        Command::Users(args) => commands::users::run(&client, &args, cli.format),
        Command::Browse => commands::browse::run(client, session, &session_path),
    }
}
