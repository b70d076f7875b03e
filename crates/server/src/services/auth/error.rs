//! Authentication error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// JSON envelope for the auth surface.
///
/// The admin client expects `{success, message}` on every auth failure,
/// so auth handlers respond through this type rather than the generic
/// `{error}` envelope.
#[derive(Debug, Serialize)]
struct AuthErrorResponse {
    success: bool,
    message: String,
}

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required credential field is missing or empty. Carries the
    /// client-facing message.
    #[error("{0}")]
    MissingFields(&'static str),

    /// Invalid credentials (unknown username or wrong password).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found (change-password only; login folds unknown
    /// usernames into `InvalidCredentials`).
    #[error("user not found")]
    UserNotFound,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if matches!(self, Self::PasswordHash | Self::Repository(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Auth request error"
            );
        }

        let (status, message) = match &self {
            Self::MissingFields(msg) => (StatusCode::BAD_REQUEST, (*msg).to_string()),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            Self::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            Self::PasswordHash | Self::Repository(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (
            status,
            Json(AuthErrorResponse {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        fn get_status(err: AuthError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AuthError::MissingFields("Missing username or password")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AuthError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(get_status(AuthError::UserNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(AuthError::PasswordHash),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
