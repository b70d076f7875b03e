//! HTTP route handlers for the JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /stores?q=&district=  - Search/list stores
//! POST   /stores               - Create store
//! PUT    /stores               - Partial update, keyed by original_name
//! DELETE /stores?name=         - Delete by name
//! GET    /districts            - List district boundaries
//! GET    /stats                - Per-district store counts
//! POST   /login                - Authenticate
//! POST   /change-password      - Rotate credential
//! ```
//!
//! Health endpoints (`/health`, `/health/ready`) live in `main.rs`.

pub mod auth;
pub mod districts;
pub mod stats;
pub mod stores;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/stores",
            get(stores::search)
                .post(stores::create)
                .put(stores::update)
                .delete(stores::remove),
        )
        .route("/districts", get(districts::list))
        .route("/stats", get(stats::stats))
        .route("/login", post(auth::login))
        .route("/change-password", post(auth::change_password))
}
