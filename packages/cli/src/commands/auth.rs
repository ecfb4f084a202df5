use std::path::Path;

use clap::Args;
use dialoguer::Password;

use super::announce;
use crate::api::BlogClient;
use crate::notification::Action;
use crate::session::Session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub username: String,

    /// Prompted for (hidden) when omitted.
    #[arg(long, env = "BLOGILISTA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

pub fn login(client: &BlogClient, args: &LoginArgs, session_path: &Path) -> anyhow::Result<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => Password::new().with_prompt("password").interact()?,
    };

    match client.login(&args.username, &password) {
        Ok(res) => {
            let session = Session::from(res);
            session.save(session_path)?;
            tracing::debug!(path = %session_path.display(), "Session stored");
            announce(Action::welcome(&session.username));
            Ok(())
        }
        Err(e) if e.is_invalid_credentials() => {
            announce(Action::login_failed());
            Err(anyhow::Error::new(e).context("Login failed"))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn logout(session_path: &Path) -> anyhow::Result<()> {
    Session::clear(session_path)?;
    println!("Logged out.");
    Ok(())
}
