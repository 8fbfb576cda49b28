//! Integration tests for the authentication middleware and route guards.

mod helpers;

use std::time::Duration;

use axum::http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_no_header_on_guarded_route() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/users/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "you must be logged in");
}

#[tokio::test]
async fn test_no_header_on_open_route() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_non_bearer_header_is_anonymous() {
    let app = TestApp::new();

    let response = app
        .request_with_header("GET", "/api/health", None, Some("Basic dXNlcjpwYXNz"))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request_with_header("GET", "/api/users/me", None, Some("Basic dXNlcjpwYXNz"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "you must be logged in");
}

#[tokio::test]
async fn test_malformed_token_rejected() {
    let app = TestApp::new();

    let too_long = "x".repeat(44);
    let bad_alphabet = "+".repeat(43);

    for token in ["short", "has spaces in it", too_long.as_str(), bad_alphabet.as_str()] {
        let response = app.request("GET", "/api/health", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "token {token:?}");
        assert_eq!(
            response.body["message"],
            "invalid or expired authentication token"
        );
    }
}

#[tokio::test]
async fn test_unknown_token_rejected() {
    let app = TestApp::new();
    let unknown = "A".repeat(43);

    let response = app.request("GET", "/api/users/me", None, Some(&unknown)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["message"],
        "invalid or expired authentication token"
    );
}

#[tokio::test]
async fn test_user_token_on_admin_route() {
    let app = TestApp::new();
    let token = app.register_and_login("alice", "user").await;

    let response = app
        .request("GET", "/api/admin/users/alice", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_token_on_admin_route() {
    let app = TestApp::new();
    app.register("alice", "user").await;
    let token = app.register_and_login("root", "admin").await;

    let response = app
        .request("GET", "/api/admin/users/alice", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_admin_route_unknown_user() {
    let app = TestApp::new();
    let token = app.register_and_login("root", "admin").await;

    let response = app
        .request("GET", "/api/admin/users/ghost", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_anonymous_on_admin_route() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/admin/users/alice", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new();
    app.register("alice", "user").await;
    let token = app.issue_token("alice", Duration::from_millis(300)).await;

    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(400)).await;

    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["message"],
        "invalid or expired authentication token"
    );

    // Open routes reject it too rather than falling back to anonymous.
    let response = app.request("GET", "/api/health", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
