//! Router fixtures for handler tests.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tower::ServiceExt;

use crate::config::ServerConfig;
use crate::state::AppState;

fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|key| {
        (key == "DATABASE_URL").then(|| "postgres://127.0.0.1:1/contact_book_test".to_owned())
    })
    .unwrap()
}

fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy("postgres://127.0.0.1:1/contact_book_test")
        .unwrap()
}

/// Router over a pool that never connects until a query runs.
///
/// Suitable for requests that are rejected before reaching the store.
pub fn lazy_app() -> Router {
    crate::app(AppState::new(test_config(), lazy_pool()))
}

/// Like [`lazy_app`], with a custom request deadline.
pub fn lazy_app_with_timeout(request_timeout: Duration) -> Router {
    let mut config = test_config();
    config.request_timeout = request_timeout;
    crate::app(AppState::new(config, lazy_pool()))
}

/// Router over a live pool, usually one handed out by `#[sqlx::test]`.
pub fn app_with_pool(pool: PgPool) -> Router {
    crate::app(AppState::new(test_config(), pool))
}

/// Build a request, with a JSON content type when a body is given.
pub fn request(method: Method, uri: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_owned()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send one request and decode the JSON response body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
