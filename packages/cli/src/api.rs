//! Blocking HTTP client for the blog list API.

use std::time::Duration;

use common::blog::{CommentRequest, CreateBlogRequest, UpdateBlogRequest};
use common::user::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse};
use common::{BlogResponse, BlogStats};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors returned by [`BlogClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message} ({code}, HTTP {status})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The request never got a usable answer.
    #[error("connection error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::Api { code, .. } if code == "INVALID_CREDENTIALS")
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Turn a failed response body into [`ClientError::Api`], tolerating bodies
/// that are not the server's `{code, message}` shape.
fn api_error(status: StatusCode, text: &str) -> ClientError {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => ClientError::Api {
            status: status.as_u16(),
            code: body.code,
            message: body.message,
        },
        Err(_) => ClientError::Api {
            status: status.as_u16(),
            code: "HTTP_ERROR".into(),
            message: if text.is_empty() {
                status.canonical_reason().unwrap_or("request failed").into()
            } else {
                text.into()
            },
        },
    }
}

fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().unwrap_or_default();
    tracing::debug!(%status, body = %text, "API request failed");
    Err(api_error(status, &text))
}

pub struct BlogClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BlogClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let response = check(self.with_auth(req).send()?)?;
        Ok(response.json()?)
    }

    pub fn list_blogs(&self) -> Result<Vec<BlogResponse>, ClientError> {
        self.send(self.client.get(self.url("/blogs")))
    }

    pub fn get_blog(&self, id: i32) -> Result<BlogResponse, ClientError> {
        self.send(self.client.get(self.url(&format!("/blogs/{id}"))))
    }

    pub fn blog_stats(&self) -> Result<BlogStats, ClientError> {
        self.send(self.client.get(self.url("/blogs/stats")))
    }

    pub fn create_blog(&self, req: &CreateBlogRequest) -> Result<BlogResponse, ClientError> {
        self.send(self.client.post(self.url("/blogs")).json(req))
    }

    pub fn update_blog(
        &self,
        id: i32,
        req: &UpdateBlogRequest,
    ) -> Result<BlogResponse, ClientError> {
        self.send(self.client.put(self.url(&format!("/blogs/{id}"))).json(req))
    }

    /// Send the blog back with one more like.
    pub fn like_blog(&self, blog: &BlogResponse) -> Result<BlogResponse, ClientError> {
        let req = UpdateBlogRequest {
            title: Some(blog.title.clone()),
            author: blog.author.clone(),
            url: Some(blog.url.clone()),
            likes: Some(blog.likes.saturating_add(1)),
        };
        self.update_blog(blog.id, &req)
    }

    pub fn delete_blog(&self, id: i32) -> Result<(), ClientError> {
        let req = self.client.delete(self.url(&format!("/blogs/{id}")));
        check(self.with_auth(req).send()?)?;
        Ok(())
    }

    pub fn add_comment(&self, id: i32, comment: &str) -> Result<BlogResponse, ClientError> {
        let body = CommentRequest {
            comment: comment.to_string(),
        };
        self.send(
            self.client
                .post(self.url(&format!("/blogs/{id}/comments")))
                .json(&body),
        )
    }

    pub fn list_users(&self) -> Result<Vec<UserResponse>, ClientError> {
        self.send(self.client.get(self.url("/users")))
    }

    pub fn get_user(&self, id: i32) -> Result<UserResponse, ClientError> {
        self.send(self.client.get(self.url(&format!("/users/{id}"))))
    }

    pub fn create_user(&self, req: &CreateUserRequest) -> Result<UserResponse, ClientError> {
        self.send(self.client.post(self.url("/users")).json(req))
    }

    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.send(self.client.post(self.url("/login")).json(&body))
    }
}
