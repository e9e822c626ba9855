//! HTTP middleware stack for the contact book API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (add unique ID to each request)
//! 4. Timeout (JSON 408 after `REQUEST_TIMEOUT_SECS`)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
