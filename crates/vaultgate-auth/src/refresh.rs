//! Opaque refresh token generation, rotation, and verification.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::RngCore;
use subtle::ConstantTimeEq;

use vaultgate_core::config::auth::AuthConfig;
use vaultgate_entity::user::User;

/// Number of random bytes in a refresh token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Generates and checks the opaque refresh tokens stored on user rows.
///
/// A refresh token carries no structure: it is 32 CSPRNG bytes,
/// base64-encoded, compared byte for byte against the stored value.
#[derive(Debug, Clone)]
pub struct RefreshTokenManager {
    refresh_ttl_days: i64,
}

impl RefreshTokenManager {
    /// Creates a new manager from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            refresh_ttl_days: config.refresh_token_ttl_days as i64,
        }
    }

    /// Generate a fresh opaque token.
    pub fn generate(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        BASE64.encode(bytes)
    }

    /// Generate a fresh token together with its absolute expiry.
    ///
    /// Every rotation produces both a new token and a new expiry; the old
    /// expiry is never carried forward.
    pub fn rotate(&self) -> (String, DateTime<Utc>) {
        (
            self.generate(),
            Utc::now() + chrono::Duration::days(self.refresh_ttl_days),
        )
    }

    /// Check a candidate token against the user's stored slot.
    ///
    /// True only when the stored value matches the candidate in constant
    /// time AND the stored expiry is strictly in the future. A matching
    /// but expired token is as invalid as a mismatched one.
    pub fn verify(&self, user: &User, candidate: &str) -> bool {
        let Some(stored) = user.refresh_token.as_deref() else {
            return false;
        };
        let Some(expires_at) = user.refresh_token_expires_at else {
            return false;
        };

        let matches: bool = stored.as_bytes().ct_eq(candidate.as_bytes()).into();
        matches && expires_at > Utc::now()
    }
}
