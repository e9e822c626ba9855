//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Every error response has the body `{"success": false, "message": ...}`.
//! Store failures always answer with the fixed message of the endpoint that
//! failed; the underlying cause is logged, never sent.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A store operation failed. `message` is what the client sees.
    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request ran past the configured deadline.
    #[error("Request timed out")]
    Timeout,
}

impl AppError {
    /// Wrap a repository error with the endpoint's public failure message.
    pub const fn store(message: &'static str, source: RepositoryError) -> Self {
        Self::Store { message, source }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Message safe to show to the client.
    #[must_use]
    pub fn public_message(&self) -> &str {
        match self {
            Self::Store { message, .. } => *message,
            Self::NotFound(message) | Self::BadRequest(message) => message.as_str(),
            Self::Timeout => "Request timed out",
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub success: bool,
    pub message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Store { .. }) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else if matches!(self, Self::Timeout) {
            tracing::warn!("Request timed out");
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }

        let body = ErrorBody {
            success: false,
            message: self.public_message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
