//! User roles for the administrative client.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown role string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown role: {0}")]
pub struct RoleError(pub String);

/// Account privilege level.
///
/// Stored as lowercase text in the `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to store mutations and user management.
    Admin,
    /// Read-only client access.
    #[default]
    Standard,
}

impl Role {
    /// Parse a role from its stored text form.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError`] if the string is not a known role.
    pub fn parse(s: &str) -> Result<Self, RoleError> {
        match s {
            "admin" => Ok(Self::Admin),
            "standard" => Ok(Self::Standard),
            other => Err(RoleError(other.to_owned())),
        }
    }

    /// The stored text form of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Standard => "standard",
        }
    }

    /// Whether this role carries elevated privilege.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
        assert_eq!(Role::parse("standard").unwrap(), Role::Standard);
    }

    #[test]
    fn test_parse_unknown_role() {
        assert!(Role::parse("superuser").is_err());
        assert!(Role::parse("Admin").is_err());
        assert!(Role::parse("").is_err());
    }

    #[test]
    fn test_roundtrip() {
        for role in [Role::Admin, Role::Standard] {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Standard.is_admin());
    }
}
