pub mod analytics;
pub mod categories;
pub mod expenses;

use axum::response::Json;
use axum::routing::{get, put};
use axum::Router;
use chrono::Local;
use serde::Serialize;

use crate::state::AppState;
use crate::VERSION;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Expenses
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/api/expenses/:id",
            put(expenses::update).delete(expenses::delete),
        )
        // Categories
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        // Analytics
        .route("/api/analytics/summary", get(analytics::summary))
        .route("/api/analytics/trends", get(analytics::trends))
        // Health check
        .route("/api/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Expense Tracker API is running",
        version: VERSION,
        timestamp: Local::now().to_rfc3339(),
    })
}
