//! User management commands.

use secrecy::SecretString;
use sqlx::PgPool;

use storemap_core::{Role, RoleError};
use storemap_server::db::{self, RepositoryError, UserRepository};
use storemap_server::services::auth;

/// Errors that can occur while managing users.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("password hashing failed")]
    Hash,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create a user with an Argon2id-hashed credential.
///
/// # Errors
///
/// Returns `UserError` if the role is unknown, hashing fails, the
/// username is taken, or the database is unreachable.
pub async fn create(username: &str, password: &str, role: &str) -> Result<(), UserError> {
    let role = Role::parse(role)?;
    let password_hash = auth::hash_password(password).map_err(|_| UserError::Hash)?;

    let pool = connect().await?;
    let id = UserRepository::new(&pool)
        .create(username, &password_hash, role)
        .await?;

    tracing::info!("Created {role} user '{username}' with id {id}");
    Ok(())
}

/// Connect to the database from `DATABASE_URL`.
async fn connect() -> Result<PgPool, UserError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| UserError::MissingEnvVar("DATABASE_URL"))?;

    Ok(db::create_pool(&SecretString::from(database_url)).await?)
}
