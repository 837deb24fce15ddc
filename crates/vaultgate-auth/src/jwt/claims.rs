//! JWT claims structure embedded in session tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vaultgate_entity::user::UserRole;

/// Claims payload carried by every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user id rendered as a string.
    pub sub: String,
    /// User's email address.
    pub email: String,
    /// Display name, "First Last".
    pub name: String,
    /// User role at the time of issuance.
    pub role: UserRole,
    /// Unique token identifier, fresh per issued token.
    pub jti: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
}

impl Claims {
    /// Parse the numeric user id out of the subject claim.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
