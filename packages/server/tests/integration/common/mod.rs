use std::net::SocketAddr;

use reqwest::Client;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde_json::Value;
use tempfile::TempDir;

use server::config::{AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig};
use server::entity::{blog, comment, user};
use server::state::AppState;

pub mod routes {
    pub const BLOGS: &str = "/api/blogs";
    pub const BLOG_STATS: &str = "/api/blogs/stats";
    pub const USERS: &str = "/api/users";
    pub const LOGIN: &str = "/api/login";

    pub fn blog(id: i32) -> String {
        format!("/api/blogs/{id}")
    }

    pub fn blog_comments(id: i32) -> String {
        format!("/api/blogs/{id}/comments")
    }

    pub fn user(id: i32) -> String {
        format!("/api/users/{id}")
    }
}

/// Username and password of the user owning the seeded blogs.
pub const ROOT_USERNAME: &str = "root";
pub const ROOT_PASSWORD: &str = "sekret";

/// The five blogs every collection test starts from: (title, author, url, likes).
pub const INITIAL_BLOGS: &[(&str, &str, &str, i32)] = &[
    (
        "React patterns",
        "Michael Chan",
        "https://reactpatterns.com/",
        7,
    ),
    (
        "Go To Statement Considered Harmful",
        "Edsger W. Dijkstra",
        "http://www.u.arizona.edu/~rubinson/copyright_violations/Go_To_Considered_Harmful.html",
        5,
    ),
    (
        "Canonical string reduction",
        "Edsger W. Dijkstra",
        "http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html",
        12,
    ),
    (
        "First class tests",
        "Robert C. Martin",
        "http://blog.cleancoder.com/uncle-bob/2017/05/05/TestDefinitions.htmll",
        10,
    ),
    (
        "TDD harms architecture",
        "Robert C. Martin",
        "http://blog.cleancoder.com/uncle-bob/2017/03/03/TDD-Harms-Architecture.html",
        0,
    ),
];

/// A running test server backed by its own SQLite file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    _db_dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub content_type: String,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            db_dir.path().join("blogilista.db").display()
        );

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: db_url,
                max_connections: 5,
                min_connections: 1,
            },
            auth: AuthConfig {
                jwt_secret: "test-secret-for-integration-tests".to_string(),
                token_ttl_secs: 3600,
            },
        };

        let db = server::database::init_db(&app_config.database)
            .await
            .expect("Failed to initialize test database");
        server::seed::ensure_indexes(&db)
            .await
            .expect("Failed to create indexes");

        let state = AppState {
            db: db.clone(),
            config: app_config,
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            _db_dir: db_dir,
        }
    }

    /// Spawn a server whose store holds the root user and the five initial blogs.
    pub async fn spawn_with_blogs() -> Self {
        let app = Self::spawn().await;
        let root_id = app.insert_user(ROOT_USERNAME, "Superuser", ROOT_PASSWORD).await;
        for &(title, author, url, likes) in INITIAL_BLOGS {
            app.insert_blog(root_id, title, author, url, likes).await;
        }
        app
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let res = self
            .post_without_token(
                routes::LOGIN,
                &serde_json::json!({"username": username, "password": password}),
            )
            .await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);

        res.body["token"]
            .as_str()
            .expect("Login response should contain a token")
            .to_string()
    }

    /// Log in as the owner of the seeded blogs.
    pub async fn root_token(&self) -> String {
        self.login(ROOT_USERNAME, ROOT_PASSWORD).await
    }

    /// Create a user through the API, log in, and return the token.
    pub async fn create_authenticated_user(&self, username: &str, password: &str) -> String {
        let res = self
            .post_without_token(
                routes::USERS,
                &serde_json::json!({
                    "username": username,
                    "name": username,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "User creation failed: {}", res.text);

        self.login(username, password).await
    }

    /// Insert a user row directly and return its `id`.
    pub async fn insert_user(&self, username: &str, name: &str, password: &str) -> i32 {
        let password_hash =
            server::utils::hash::hash_password(password).expect("Failed to hash password");
        let model = user::ActiveModel {
            username: Set(username.to_string()),
            name: Set(name.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        model.insert(&self.db).await.expect("insert user").id
    }

    /// Insert a blog row directly and return its `id`.
    pub async fn insert_blog(
        &self,
        user_id: i32,
        title: &str,
        author: &str,
        url: &str,
        likes: i32,
    ) -> i32 {
        let model = blog::ActiveModel {
            title: Set(title.to_string()),
            author: Set(Some(author.to_string())),
            url: Set(url.to_string()),
            likes: Set(likes),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        model.insert(&self.db).await.expect("insert blog").id
    }

    /// All blogs currently in the store, in insertion order.
    pub async fn blogs_in_db(&self) -> Vec<blog::Model> {
        blog::Entity::find()
            .order_by_asc(blog::Column::Id)
            .all(&self.db)
            .await
            .expect("DB query failed")
    }

    pub async fn users_in_db(&self) -> Vec<user::Model> {
        user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .expect("DB query failed")
    }

    pub async fn comments_in_db(&self) -> Vec<comment::Model> {
        comment::Entity::find()
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .expect("DB query failed")
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            content_type,
            text,
            body,
        }
    }

    pub fn id(&self) -> i32 {
        self.body["id"]
            .as_i64()
            .expect("response body should contain 'id'") as i32
    }

    /// The `title` of every blog in a list response.
    pub fn titles(&self) -> Vec<String> {
        titles_in(&self.body)
    }

    /// The `title` of every blog nested under `field`, e.g. a user's `blogs`.
    pub fn titles_of(&self, field: &str) -> Vec<String> {
        titles_in(&self.body[field])
    }
}

fn titles_in(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("value should be an array")
        .iter()
        .map(|b| b["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
