//! Contact book server library.
//!
//! Exposes the router, repositories and configuration so the binary, the CLI
//! and the integration tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
    response::IntoResponse,
};
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::error::AppError;
use crate::state::AppState;

/// Build the application router with its tracing, request ID and timeout
/// layers. Sentry layers are added by the binary.
///
/// A request that outlives `request_timeout` is answered with the usual
/// error body and status 408.
pub fn app(state: AppState) -> Router {
    let request_timeout = state.config().request_timeout;

    routes::routes()
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(axum::middleware::map_response(timeout_body))
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                        request_id = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
}

/// Give the bare 408 produced by `TimeoutLayer` the JSON error body.
async fn timeout_body(response: Response<Body>) -> Response<Body> {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        AppError::Timeout.into_response()
    } else {
        response
    }
}
