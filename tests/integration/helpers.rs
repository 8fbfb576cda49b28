//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use libris_api::AppState;
use libris_auth::TokenIssuer;
use libris_core::config::{AppConfig, AuthConfig};
use libris_database::{MemoryStore, UserStore};
use libris_entity::session::TokenScope;

pub const PASSWORD: &str = "Secret123!";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct inspection
    pub store: MemoryStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application on a fresh in-memory store
    pub fn new() -> Self {
        let config = AppConfig {
            auth: AuthConfig {
                argon2_memory_kib: 8192,
                argon2_iterations: 1,
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        };

        let store = MemoryStore::new();
        let state = AppState::new(
            config.clone(),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            None,
        )
        .expect("Failed to build app state");

        Self {
            router: libris_api::build_app(state),
            store,
            config,
        }
    }

    /// Register a user through the API
    pub async fn register(&self, username: &str, account_type: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/users",
            Some(serde_json::json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": PASSWORD,
                "account_type": account_type,
                "address": "1 Library Way",
            })),
            None,
        )
        .await
    }

    /// Login and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Register then login, returning the bearer token
    pub async fn register_and_login(&self, username: &str, account_type: &str) -> String {
        let response = self.register(username, account_type).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        self.login(username, PASSWORD).await
    }

    /// Issue a token for an existing user directly through the store, with
    /// a lifetime shorter than configuration allows
    pub async fn issue_token(&self, username: &str, ttl: Duration) -> String {
        let user = self
            .store
            .find_by_username(username)
            .await
            .expect("User lookup failed")
            .expect("User not registered");

        TokenIssuer::new(Arc::new(self.store.clone()))
            .create_new_token(user.id, ttl, TokenScope::from(user.role))
            .await
            .expect("Failed to issue token")
            .plaintext
    }

    /// Make an HTTP request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let authorization = token.map(|t| format!("Bearer {t}"));
        self.request_with_header(method, path, body, authorization.as_deref())
            .await
    }

    /// Make an HTTP request with a raw `Authorization` header value
    pub async fn request_with_header(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
