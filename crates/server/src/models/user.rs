//! User domain type.

use storemap_core::{Role, UserId};

/// An account for the administrative client (domain type).
///
/// The password hash is deliberately not part of this type; repository
/// methods that need it return it alongside the user.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}
