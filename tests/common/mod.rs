//! Shared test utilities for integration tests.
//!
//! `TestClient` drives the full router against a fresh in-memory database
//! that has been migrated and seeded exactly as on startup.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use expense_tracker::config::Config;
use expense_tracker::db::create_in_memory_pool;
use expense_tracker::server::{initialize_database, router};
use expense_tracker::state::AppState;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::PathBuf;
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 5000,
        database_path: PathBuf::from(":memory:"),
        migrations_path: PathBuf::from("migrations"),
    }
}

pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Create a new test client with a fresh in-memory database.
    pub fn new() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        let config = test_config();
        initialize_database(&pool, &config).expect("Failed to initialize database");

        Self {
            state: AppState::new(pool),
        }
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// GET and parse the body as JSON.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        (status, parse(&body))
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, body) = self
            .send(Self::json_request(Method::POST, uri, &body))
            .await;
        (status, parse(&body))
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, body) = self.send(Self::json_request(Method::PUT, uri, &body)).await;
        (status, parse(&body))
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self
            .send(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        (status, parse(&body))
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Create an expense and return its id, asserting the request succeeded.
    pub async fn create_expense(&self, amount: f64, category: &str, date: &str) -> i64 {
        let (status, body) = self
            .post_json(
                "/api/expenses",
                json!({"amount": amount, "category": category, "date": date}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["id"].as_i64().expect("response should carry an id")
    }

    pub async fn expense_count(&self) -> usize {
        let (_, body) = self.get_json("/api/expenses").await;
        body.as_array().map(Vec::len).unwrap_or_default()
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or(Value::Null)
}
