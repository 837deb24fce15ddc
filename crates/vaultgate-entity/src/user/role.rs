//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
///
/// Serialized in PascalCase (`"Admin"`, `"User"`) to match both the
/// client API contract and the JWT role claim.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    /// Full system administrator.
    Admin,
    /// Regular authenticated user.
    #[default]
    User,
}

impl UserRole {
    /// Return the role as its canonical string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "User" => Ok(Self::User),
            _ => Err(format!(
                "Invalid user role: '{s}'. Expected one of: Admin, User"
            )),
        }
    }
}
