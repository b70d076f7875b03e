//! Authentication route handlers.
//!
//! The admin client expects `{success, ...}` envelopes with camelCase
//! field names on this surface; failures respond through
//! [`AuthError`]'s `IntoResponse` impl.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// Change-password request body.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub username: Option<String>,
    #[serde(rename = "oldPassword")]
    pub old_password: Option<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Option<String>,
}

/// Generic auth success response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

/// Require a credential field to be present and non-empty.
fn required(value: Option<String>, message: &'static str) -> Result<String, AuthError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingFields(message))
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Authenticate a user.
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let username = required(request.username, "Missing username or password")?;
    let password = required(request.password, "Missing username or password")?;

    let user = AuthService::new(state.pool())
        .login(&username, &password)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        is_admin: user.role.is_admin(),
    }))
}

/// Rotate a user's credential.
///
/// POST /change-password
pub async fn change_password(
    State(state): State<AppState>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<StatusResponse>, AuthError> {
    const MISSING: &str = "Missing username, old password, or new password";

    let username = required(request.username, MISSING)?;
    let old_password = required(request.old_password, MISSING)?;
    let new_password = required(request.new_password, MISSING)?;

    AuthService::new(state.pool())
        .change_password(&username, &old_password, &new_password)
        .await?;

    Ok(Json(StatusResponse {
        success: true,
        message: "Password changed successfully".to_owned(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_password_request_is_camel_case() {
        let request: ChangePasswordRequest = serde_json::from_value(json!({
            "username": "admin",
            "oldPassword": "old",
            "newPassword": "new"
        }))
        .unwrap();

        assert_eq!(request.old_password.as_deref(), Some("old"));
        assert_eq!(request.new_password.as_deref(), Some("new"));
    }

    #[test]
    fn test_login_response_wire_shape() {
        let value = serde_json::to_value(LoginResponse {
            success: true,
            is_admin: true,
        })
        .unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["isAdmin"], true);
        assert!(value.get("is_admin").is_none());
    }

    #[test]
    fn test_required_rejects_empty_and_missing() {
        assert!(required(None, "msg").is_err());
        assert!(required(Some(String::new()), "msg").is_err());
        assert_eq!(required(Some("x".to_owned()), "msg").unwrap(), "x");
    }
}
