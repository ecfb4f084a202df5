use serde_json::json;

use crate::common::{ROOT_PASSWORD, ROOT_USERNAME, TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn valid_credentials_return_token_and_identity() {
        let app = TestApp::spawn_with_blogs().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": ROOT_USERNAME, "password": ROOT_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(!res.body["token"].as_str().unwrap().is_empty());
        assert_eq!(res.body["username"], "root");
        assert_eq!(res.body["name"], "Superuser");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn_with_blogs().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": ROOT_USERNAME, "password": "wrong"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
        assert!(res.body.get("token").is_none());
    }

    #[tokio::test]
    async fn unknown_user_gets_the_same_rejection() {
        let app = TestApp::spawn_with_blogs().await;

        let wrong_password = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": ROOT_USERNAME, "password": "wrong"}),
            )
            .await;
        let unknown_user = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "nobody", "password": "wrong"}),
            )
            .await;

        assert_eq!(unknown_user.status, 401);
        assert_eq!(unknown_user.body, wrong_password.body);
    }

    #[tokio::test]
    async fn missing_fields_are_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"username": "root"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let app = TestApp::spawn().await;

        let token = app.create_authenticated_user("mluukkai", "salainen").await;

        assert!(!token.is_empty());
    }
}

mod tokens {
    use super::*;

    #[tokio::test]
    async fn issued_token_authorizes_blog_creation() {
        let app = TestApp::spawn_with_blogs().await;
        let token = app.root_token().await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "Type wars", "url": "http://example.com/type-wars"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["user"]["username"], ROOT_USERNAME);
    }

    #[tokio::test]
    async fn token_of_deleted_user_is_rejected() {
        use sea_orm::EntityTrait;
        use server::entity::user;

        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("ghost", "boo").await;
        let id = app.users_in_db().await[0].id;
        user::Entity::delete_by_id(id)
            .exec(&app.db)
            .await
            .expect("delete user");

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "Haunted", "url": "http://example.com/haunted"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn authorization_header_must_use_bearer_scheme() {
        let app = TestApp::spawn_with_blogs().await;
        let token = app.root_token().await;

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::BLOGS))
            .header("Authorization", format!("Basic {token}"))
            .json(&json!({"title": "Type wars", "url": "http://example.com"}))
            .send()
            .await
            .expect("request");

        assert_eq!(res.status().as_u16(), 401);
    }
}
