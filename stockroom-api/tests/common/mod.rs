/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - In-memory test database with migrations applied
/// - App construction with fixed test secrets
/// - Request helpers for the JSON endpoints
/// - Session cookie extraction from login responses

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use stockroom_api::app::{build_router, AppState};
use stockroom_api::config::{ApiConfig, AuthConfig, Config, DatabaseConfig};
use stockroom_shared::db::migrations::run_migrations;
use tower::Service as _;

pub const TEST_PASSWORD_SECRET: &str = "test-password-pepper-0123456789abcdef";
pub const TEST_TOKEN_SECRET: &str = "test-token-signing-key-0123456789abc";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context backed by a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        // A single connection keeps every query on the same in-memory DB
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            auth: AuthConfig {
                password_secret: TEST_PASSWORD_SECRET.to_string(),
                token_secret: TEST_TOKEN_SECRET.to_string(),
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends a JSON POST to the app
    pub async fn post_json(
        &mut self,
        uri: &str,
        body: serde_json::Value,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.app.call(request).await.unwrap()
    }

    /// Sends a GET to the app
    pub async fn get(&mut self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = builder.body(Body::empty()).unwrap();
        self.app.call(request).await.unwrap()
    }

    /// Registers a user and asserts the redirect response
    pub async fn register(&mut self, email: &str, password: &str) {
        let response = self
            .post_json(
                "/register",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "rpassword": password,
                }),
                None,
            )
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    /// Logs a user in and returns the session cookie (`token=...`)
    pub async fn login(&mut self, email: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/login",
                serde_json::json!({"email": email, "password": password}),
                None,
            )
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("login should set the session cookie")
    }
}

/// Extracts the `token=<value>` pair from a response's Set-Cookie header
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let raw = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = raw.split(';').next()?.trim();

    if pair.starts_with("token=") && pair.len() > "token=".len() {
        Some(pair.to_string())
    } else {
        None
    }
}

/// Reads a response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
