//! Request extractors that reject malformed input with a JSON 400.
//!
//! Axum's own `Json` and `Query` extractors answer bad input with plain-text
//! 400/415/422 responses. These wrappers route every rejection through
//! [`AppError::BadRequest`] so clients always get the error body shape.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body, deserialized and validated into `T`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string, deserialized and validated into `T`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
