//! Database operations for the StoreMap `PostgreSQL` database.
//!
//! # Tables
//!
//! - `stores` - Branch records with a `geometry(Point, 4326)` location
//! - `districts` - Boundary polygons, read-only at serving time
//! - `users` - Username/password authentication for the admin client
//!
//! All queries are runtime-checked `sqlx::query`/`query_as` calls: the
//! PostGIS expressions (`ST_X`, `ST_MakePoint`, `ST_AsGeoJSON`, ...) are
//! outside the compile-time macros' type knowledge. Row types derive
//! `sqlx::FromRow` and convert into domain types via `TryFrom`.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p storemap-cli -- migrate
//! ```

pub mod districts;
pub mod stores;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use districts::DistrictRepository;
pub use stores::StoreRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique store name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// Each request checks a connection out of this pool for the duration of
/// its statements and returns it on every exit path.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
