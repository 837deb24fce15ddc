//! Request DTOs.
//!
//! Field names are camelCase on the wire to match the client contract.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The only body shape accepted on protected operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// Base64 ciphertext of the actual JSON body.
    pub data: String,
}

/// Registration payload (decrypted).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Plaintext password. Minimum length is enforced against the
    /// configured `auth.password_min_length` at the handler.
    pub password: String,
    /// Given name.
    #[validate(length(min = 1))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1))]
    pub last_name: String,
}

/// Login payload (decrypted).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Refresh payload (decrypted).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// The session token, possibly expired.
    pub token: String,
    /// The opaque refresh token.
    pub refresh_token: String,
}
