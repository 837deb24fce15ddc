//! Response DTOs (pre-encryption plaintext shapes).

use serde::{Deserialize, Serialize};

use vaultgate_entity::user::UserProfile;
use vaultgate_service::SessionTokens;

/// Credential triple returned by register, login, and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Signed session token.
    pub token: String,
    /// Opaque refresh token.
    pub refresh_token: String,
    /// The authenticated user.
    pub user: UserProfile,
}

impl From<SessionTokens> for AuthResponse {
    fn from(tokens: SessionTokens) -> Self {
        Self {
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            user: tokens.user.profile(),
        }
    }
}

/// Profile view. Role is deliberately not included here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// User id.
    pub id: i64,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
        }
    }
}

/// User directory listing. The wrapper keeps the plaintext a JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    /// All users.
    pub users: Vec<UserProfile>,
}

/// Error body sealed into the envelope on failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Public error message.
    pub error: String,
}
