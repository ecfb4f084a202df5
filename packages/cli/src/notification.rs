//! Transient status line shown above the interactive menu.
//!
//! The state only changes through [`reduce`]; expiry is checked whenever the
//! current notification is read, against a caller-supplied clock.

use std::time::{Duration, Instant};

use console::style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Danger,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Idle,
    Showing {
        message: String,
        kind: NotificationKind,
        expires_at: Instant,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Show {
        message: String,
        kind: NotificationKind,
        ttl: Duration,
    },
    Clear,
}

/// Display text for an optional author.
pub fn author_or_unknown(author: Option<&str>) -> &str {
    author.unwrap_or("unknown author")
}

impl Action {
    pub fn blog_created(title: &str, author: Option<&str>) -> Self {
        Self::Show {
            message: format!("a new blog {title} by {} added", author_or_unknown(author)),
            kind: NotificationKind::Success,
            ttl: Duration::from_secs(3),
        }
    }

    pub fn welcome(username: &str) -> Self {
        Self::Show {
            message: format!("welcome {username}"),
            kind: NotificationKind::Success,
            ttl: Duration::from_secs(5),
        }
    }

    pub fn login_failed() -> Self {
        Self::Show {
            message: "wrong username or password".into(),
            kind: NotificationKind::Danger,
            ttl: Duration::from_secs(3),
        }
    }

    pub fn blog_already_removed(title: &str, author: Option<&str>) -> Self {
        Self::Show {
            message: format!(
                "Blog '{title}' by {} was already removed from server",
                author_or_unknown(author)
            ),
            kind: NotificationKind::Danger,
            ttl: Duration::from_secs(3),
        }
    }

    /// Like [`Action::blog_already_removed`] for a blog that was gone before
    /// its title could be read.
    pub fn blog_id_already_removed(id: i32) -> Self {
        Self::Show {
            message: format!("Blog {id} was already removed from server"),
            kind: NotificationKind::Danger,
            ttl: Duration::from_secs(3),
        }
    }
}

pub fn reduce(_state: Notification, action: Action, now: Instant) -> Notification {
    match action {
        Action::Show { message, kind, ttl } => Notification::Showing {
            message,
            kind,
            expires_at: now + ttl,
        },
        Action::Clear => Notification::Idle,
    }
}

impl Notification {
    pub fn dispatch(&mut self, action: Action, now: Instant) {
        let state = std::mem::replace(self, Notification::Idle);
        *self = reduce(state, action, now);
    }

    /// The visible message at `now`. Drops to `Idle` once the deadline has passed.
    pub fn current(&mut self, now: Instant) -> Option<(&str, NotificationKind)> {
        let expired =
            matches!(self, Notification::Showing { expires_at, .. } if now >= *expires_at);
        if expired {
            *self = Notification::Idle;
        }
        match self {
            Notification::Idle => None,
            Notification::Showing { message, kind, .. } => Some((message.as_str(), *kind)),
        }
    }

    /// Print the current message, if any, coloured by kind.
    pub fn render(&mut self, now: Instant) {
        if let Some((message, kind)) = self.current(now) {
            println!("{}", styled(message, kind));
        }
    }
}

pub fn styled(message: &str, kind: NotificationKind) -> String {
    match kind {
        NotificationKind::Success => style(message).green().to_string(),
        NotificationKind::Danger => style(message).red().bold().to_string(),
    }
}
