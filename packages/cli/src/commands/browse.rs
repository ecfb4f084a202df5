//! Interactive mode: the single-page front end as a terminal menu loop.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use common::BlogResponse;
use common::blog::CreateBlogRequest;
use console::{Term, style};
use dialoguer::{Confirm, Input, Password, Select};

use super::blogs::{can_remove, sorted_by_likes};
use super::{author_or_unknown, blog_line, print_blog_detail};
use crate::api::{BlogClient, ClientError};
use crate::notification::{Action, Notification, NotificationKind};
use crate::session::Session;

struct Browser {
    client: BlogClient,
    session: Option<Session>,
    session_path: PathBuf,
    notification: Notification,
    blogs: Vec<BlogResponse>,
    term: Term,
}

enum MainChoice {
    Blog(usize),
    NewBlog,
    Users,
    Logout,
    Quit,
}

pub fn run(client: BlogClient, session: Option<Session>, session_path: &Path) -> anyhow::Result<()> {
    let mut browser = Browser {
        client,
        session,
        session_path: session_path.to_path_buf(),
        notification: Notification::Idle,
        blogs: Vec::new(),
        term: Term::stdout(),
    };
    browser.blogs = browser.client.list_blogs()?;
    browser.run()
}

impl Browser {
    fn notify(&mut self, action: Action) {
        self.notification.dispatch(action, Instant::now());
    }

    fn notify_error(&mut self, err: &ClientError) {
        self.notify(Action::Show {
            message: err.to_string(),
            kind: NotificationKind::Danger,
            ttl: Duration::from_secs(3),
        });
    }

    fn header(&mut self) -> anyhow::Result<()> {
        self.term.clear_screen()?;
        if let Some(session) = &self.session {
            println!("{}", style(format!("{} logged in", session.name)).dim());
        }
        self.notification.render(Instant::now());
        println!("{}", style("blogs").bold().underlined());
        Ok(())
    }

    fn run(&mut self) -> anyhow::Result<()> {
        loop {
            if self.session.is_none() {
                if !self.login_screen()? {
                    return Ok(());
                }
                continue;
            }

            match self.main_menu()? {
                MainChoice::Blog(index) => self.blog_view(index)?,
                MainChoice::NewBlog => self.new_blog()?,
                MainChoice::Users => self.users_view()?,
                MainChoice::Logout => {
                    Session::clear(&self.session_path)?;
                    self.session = None;
                    self.client.set_token(None);
                    self.notify(Action::Clear);
                }
                MainChoice::Quit => return Ok(()),
            }
        }
    }

    /// Returns `false` when the user chose to quit.
    fn login_screen(&mut self) -> anyhow::Result<bool> {
        self.header()?;
        println!("log in to application");
        let choice = Select::new()
            .items(&["login", "quit"])
            .default(0)
            .interact()?;
        if choice == 1 {
            return Ok(false);
        }

        let username: String = Input::new().with_prompt("username").interact_text()?;
        let password = Password::new().with_prompt("password").interact()?;

        match self.client.login(&username, &password) {
            Ok(res) => {
                let session = Session::from(res);
                session.save(&self.session_path)?;
                self.client.set_token(Some(session.token.clone()));
                self.notify(Action::welcome(&username));
                self.session = Some(session);
            }
            Err(e) if e.is_invalid_credentials() => self.notify(Action::login_failed()),
            Err(e) => self.notify_error(&e),
        }
        Ok(true)
    }

    fn main_menu(&mut self) -> anyhow::Result<MainChoice> {
        self.blogs = sorted_by_likes(std::mem::take(&mut self.blogs));
        self.header()?;

        let mut items: Vec<String> = self.blogs.iter().map(blog_line).collect();
        items.extend(["+ new blog", "users", "logout", "quit"].map(String::from));

        let choice = Select::new().items(&items).default(0).interact()?;
        let count = self.blogs.len();
        Ok(match choice {
            i if i < count => MainChoice::Blog(i),
            i if i == count => MainChoice::NewBlog,
            i if i == count + 1 => MainChoice::Users,
            i if i == count + 2 => MainChoice::Logout,
            _ => MainChoice::Quit,
        })
    }

    fn blog_view(&mut self, index: usize) -> anyhow::Result<()> {
        loop {
            let Some(blog) = self.blogs.get(index).cloned() else {
                return Ok(());
            };
            self.header()?;
            print_blog_detail(&blog);

            let removable = can_remove(&blog, self.session.as_ref());
            let mut items = vec!["like", "comment"];
            if removable {
                items.push("remove");
            }
            items.push("back");

            let choice = Select::new().items(&items).default(0).interact()?;
            match items[choice] {
                "like" => match self.client.like_blog(&blog) {
                    Ok(updated) => self.blogs[index] = updated,
                    Err(e) if e.is_not_found() => self.notify(Action::blog_already_removed(
                        &blog.title,
                        blog.author.as_deref(),
                    )),
                    Err(e) => self.notify_error(&e),
                },
                "comment" => {
                    let text: String = Input::new().with_prompt("comment").interact_text()?;
                    match self.client.add_comment(blog.id, &text) {
                        Ok(updated) => self.blogs[index] = updated,
                        Err(e) => self.notify_error(&e),
                    }
                }
                "remove" => {
                    let confirmed = Confirm::new()
                        .with_prompt(format!(
                            "Remove blog {} by {}",
                            blog.title,
                            author_or_unknown(blog.author.as_deref())
                        ))
                        .default(false)
                        .interact()?;
                    if confirmed {
                        match self.client.delete_blog(blog.id) {
                            Ok(()) => {
                                self.blogs.retain(|b| b.id != blog.id);
                                return Ok(());
                            }
                            Err(e) => self.notify_error(&e),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn new_blog(&mut self) -> anyhow::Result<()> {
        self.header()?;
        println!("create new");
        let title: String = Input::new().with_prompt("title").interact_text()?;
        let author: String = Input::new()
            .with_prompt("author")
            .allow_empty(true)
            .interact_text()?;
        let url: String = Input::new().with_prompt("url").interact_text()?;

        let req = CreateBlogRequest {
            title: Some(title),
            author: Some(author).filter(|a| !a.trim().is_empty()),
            url: Some(url),
            likes: None,
        };
        match self.client.create_blog(&req) {
            Ok(blog) => {
                self.notify(Action::blog_created(&blog.title, blog.author.as_deref()));
                self.blogs.push(blog);
            }
            Err(e) => self.notify_error(&e),
        }
        Ok(())
    }

    fn users_view(&mut self) -> anyhow::Result<()> {
        let users = match self.client.list_users() {
            Ok(users) => users,
            Err(e) => {
                self.notify_error(&e);
                return Ok(());
            }
        };

        loop {
            self.header()?;
            println!("{}", style("Users").bold());
            let mut items: Vec<String> = users
                .iter()
                .map(|u| format!("{:<24} {} blogs created", u.name, u.blogs.len()))
                .collect();
            items.push("back".into());

            let choice = Select::new().items(&items).default(0).interact()?;
            let Some(user) = users.get(choice) else {
                return Ok(());
            };

            self.header()?;
            println!("{}", style(&user.name).bold());
            println!("added blogs");
            for blog in &user.blogs {
                println!("  - {}", blog.title);
            }
            Select::new().items(&["back"]).default(0).interact()?;
        }
    }
}
