//! Integration tests for registration, login, and logout.

mod helpers;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_and_login() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(serde_json::json!({
                "username": "alice",
                "password": "Secret123!",
                "account_type": "user",
                "email": "a@b.com",
                "address": "x",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["username"], "alice");
    assert_eq!(response.body["data"]["account_type"], "user");
    assert!(response.body["data"].get("password_hash").is_none());

    let before = Utc::now();
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "Secret123!",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let token = response.body["data"]["token"].as_str().unwrap();
    assert!(!token.is_empty());

    let expiry: DateTime<Utc> = response.body["data"]["expiry"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    let lifetime = expiry - before;
    assert!(lifetime > Duration::hours(24) - Duration::minutes(1));
    assert!(lifetime <= Duration::hours(24) + Duration::minutes(1));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.register("alice", "user").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "invalid credentials");
    assert!(response.body.get("data").is_none());
    assert_eq!(app.store.token_count().await, 0);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "alice" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_unknown_account_type() {
    let app = TestApp::new();

    let response = app.register("mallory", "superuser").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_account_type_is_case_insensitive() {
    let app = TestApp::new();

    let response = app.register("root", "ADMIN").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["account_type"], "admin");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new();
    app.register("alice", "user").await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(serde_json::json!({
                "username": "alice",
                "email": "other@example.com",
                "password": PASSWORD,
                "account_type": "user",
                "address": "x",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(serde_json::json!({
                "username": "alice",
                "email": "not-an-email",
                "password": PASSWORD,
                "account_type": "user",
                "address": "x",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_with_token() {
    let app = TestApp::new();
    let token = app.register_and_login("alice", "user").await;

    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_logout_revokes_every_session() {
    let app = TestApp::new();
    let first = app.register_and_login("alice", "user").await;
    let second = app.login("alice", PASSWORD).await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&first))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    for token in [&first, &second] {
        let response = app.request("GET", "/api/users/me", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_logout_requires_login() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "you must be logged in");
}

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["database"], "memory");
}
