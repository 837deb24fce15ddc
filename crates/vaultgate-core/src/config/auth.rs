//! Authentication and token configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
///
/// `jwt_secret`, `jwt_issuer`, and `jwt_audience` have no defaults:
/// the process refuses to start without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    pub jwt_secret: String,
    /// Issuer claim stamped on and required of every token.
    pub jwt_issuer: String,
    /// Audience claim stamped on and required of every token.
    pub jwt_audience: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

fn default_access_ttl() -> u64 {
    7200
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    8
}
