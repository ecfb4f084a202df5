use serde_json::json;

use crate::common::{INITIAL_BLOGS, ROOT_USERNAME, TestApp, routes};

mod creation {
    use super::*;

    #[tokio::test]
    async fn fresh_username_succeeds() {
        let app = TestApp::spawn_with_blogs().await;
        let users_at_start = app.users_in_db().await;

        let res = app
            .post_without_token(
                routes::USERS,
                &json!({"username": "mluukkai", "name": "Matti Luukkainen", "password": "salainen"}),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.content_type.starts_with("application/json"));
        assert_eq!(res.body["username"], "mluukkai");
        assert_eq!(res.body["name"], "Matti Luukkainen");
        assert_eq!(res.body["blogs"], json!([]));

        let users_at_end = app.users_in_db().await;
        assert_eq!(users_at_end.len(), users_at_start.len() + 1);
        assert!(users_at_end.iter().any(|u| u.username == "mluukkai"));
    }

    #[tokio::test]
    async fn password_is_stored_hashed_and_never_returned() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::USERS,
                &json!({"username": "mluukkai", "password": "salainen"}),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body.get("password").is_none());
        assert!(res.body.get("password_hash").is_none());
        let stored = &app.users_in_db().await[0];
        assert_ne!(stored.password_hash, "salainen");
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let app = TestApp::spawn_with_blogs().await;
        let users_at_start = app.users_in_db().await;

        let res = app
            .post_without_token(
                routes::USERS,
                &json!({"username": ROOT_USERNAME, "name": "Superuser", "password": "salainen"}),
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "USERNAME_TAKEN");
        assert_eq!(app.users_in_db().await.len(), users_at_start.len());
    }

    #[tokio::test]
    async fn too_short_username_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::USERS,
                &json!({"username": "ml", "password": "salainen"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(app.users_in_db().await.is_empty());
    }

    #[tokio::test]
    async fn too_short_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::USERS,
                &json!({"username": "mluukkai", "password": "sa"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn usernames_with_punctuation_and_non_ascii_are_accepted() {
        let app = TestApp::spawn().await;

        for username in ["matti.l", "matti-l", "mätti"] {
            let res = app
                .post_without_token(
                    routes::USERS,
                    &json!({"username": username, "password": "salainen"}),
                )
                .await;

            assert_eq!(res.status, 201, "{username}: {}", res.text);
            assert_eq!(res.body["username"], username);
        }
        assert_eq!(app.users_in_db().await.len(), 3);

        let token = app.login("mätti", "salainen").await;
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn password_length_is_counted_in_characters() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::USERS,
                &json!({"username": "mluukkai", "password": "ää"}),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(app.users_in_db().await.is_empty());

        let res = app
            .post_without_token(
                routes::USERS,
                &json!({"username": "mluukkai", "password": "äää"}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    #[tokio::test]
    async fn missing_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::USERS, &json!({"username": "mluukkai"}))
            .await;

        assert_eq!(res.status, 400);
        assert!(app.users_in_db().await.is_empty());
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn users_are_listed_with_their_blogs() {
        let app = TestApp::spawn_with_blogs().await;
        app.create_authenticated_user("mluukkai", "salainen").await;

        let res = app.get(routes::USERS).await;

        assert_eq!(res.status, 200);
        let users = res.body.as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["username"], ROOT_USERNAME);
        assert_eq!(
            users[0]["blogs"].as_array().unwrap().len(),
            INITIAL_BLOGS.len()
        );
        assert_eq!(users[0]["blogs"][0]["title"], "React patterns");
        assert!(users[0]["blogs"][0].get("user").is_none());
        assert_eq!(users[1]["blogs"], json!([]));
        assert!(users.iter().all(|u| u.get("password_hash").is_none()));
    }

    #[tokio::test]
    async fn single_user_can_be_fetched() {
        let app = TestApp::spawn_with_blogs().await;
        let id = app.users_in_db().await[0].id;

        let res = app.get(&routes::user(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.id(), id);
        assert_eq!(res.body["name"], "Superuser");
        assert_eq!(res.titles_of("blogs").len(), INITIAL_BLOGS.len());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::user(9999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn blog_created_through_api_appears_under_its_owner() {
        let app = TestApp::spawn_with_blogs().await;
        let token = app.create_authenticated_user("mluukkai", "salainen").await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "Type wars", "url": "http://example.com/type-wars"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let owner_id = res.body["user"]["id"].as_i64().unwrap() as i32;

        let res = app.get(&routes::user(owner_id)).await;
        assert_eq!(res.titles_of("blogs"), vec!["Type wars".to_string()]);
    }
}
