//! Common test utilities for integration tests.
//!
//! These tests drive the router against a real PostgreSQL database. They are
//! gated on the `TEST_DATABASE_URL` environment variable and skip themselves
//! when it is not set.

#![allow(dead_code)]

use axum::Router;
use repufeed_api::{app::create_app, config::Config};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::OnceLock;
use std::time::Duration;

static TEST_LOCK: OnceLock<tokio::sync::Mutex<()>> = OnceLock::new();

/// Serializes tests that assert on table-wide state (listings, stats).
pub async fn test_lock() -> tokio::sync::MutexGuard<'static, ()> {
    TEST_LOCK
        .get_or_init(|| tokio::sync::Mutex::new(()))
        .lock()
        .await
}

/// Create a test database pool, or `None` when `TEST_DATABASE_URL` is unset.
pub async fn try_create_test_pool() -> Option<PgPool> {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set, skipping integration test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    run_migrations(&pool).await;
    Some(pool)
}

/// Run migrations on the test database.
async fn run_migrations(pool: &PgPool) {
    let migration_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("persistence/src/migrations");

    let mut entries: Vec<_> = std::fs::read_dir(&migration_dir)
        .expect("Failed to read migrations directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "sql").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let sql = std::fs::read_to_string(entry.path()).expect("Failed to read migration file");
        sqlx::raw_sql(&sql)
            .execute(pool)
            .await
            .expect("Failed to apply migration");
    }
}

/// Test configuration pointing at the test database, mail disabled.
pub fn test_config() -> Config {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    Config::load_for_test(&[
        ("database.url", url.as_str()),
        ("mail.enabled", "false"),
        ("mail.sender_email", "owner@example.com"),
    ])
    .expect("Failed to build test config")
}

/// Create a test application router.
pub fn create_test_app(pool: PgPool) -> Router {
    create_app(test_config(), pool)
}

/// Remove all feedback and settings rows so each test starts clean.
pub async fn cleanup_all_test_data(pool: &PgPool) {
    for table in ["feedback", "settings"] {
        sqlx::query(&format!("TRUNCATE TABLE {} CASCADE", table))
            .execute(pool)
            .await
            .ok();
    }
}

/// Build a JSON request.
pub fn json_request(
    method: axum::http::Method,
    uri: &str,
    body: serde_json::Value,
) -> axum::http::Request<axum::body::Body> {
    use axum::{
        body::Body,
        http::{header, Request},
    };

    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a bodyless request.
pub fn bare_request(
    method: axum::http::Method,
    uri: &str,
) -> axum::http::Request<axum::body::Body> {
    use axum::{body::Body, http::Request};

    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper to parse JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}

/// Submit a feedback through the API and return the created record.
pub async fn submit_feedback(
    app: &Router,
    name: &str,
    email: &str,
    message: &str,
    rating: i32,
) -> serde_json::Value {
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    let request = json_request(
        Method::POST,
        "/api/feedback",
        serde_json::json!({
            "name": name,
            "email": email,
            "message": message,
            "rating": rating
        }),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    assert_eq!(status, StatusCode::CREATED, "submission failed: {}", body);
    body
}
