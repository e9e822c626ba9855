//! HTTP route handlers for the contact book API.
//!
//! # Route Structure
//!
//! ```text
//! POST /sync-contacts          - Store a batch of contacts for a user
//! GET  /find-common-users      - Users holding an exact phone number
//! GET  /get-contacts           - Paginated, searchable contact listing
//!
//! # Probes
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (database reachable)
//! ```

pub mod common_users;
pub mod contacts;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the main routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sync-contacts", post(contacts::sync_contacts))
        .route("/find-common-users", get(common_users::find_common_users))
        .route("/get-contacts", get(contacts::get_contacts))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}
