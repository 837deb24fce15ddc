//! Session token validation.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use thiserror::Error;

use vaultgate_core::config::auth::AuthConfig;

use super::claims::Claims;

/// Internal reason a token was rejected.
///
/// This detail never leaves the service layer; clients only see the coarse
/// outcome mapped at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// Token expired.
    #[error("token expired")]
    Expired,
    /// Signature does not verify under the configured secret.
    #[error("bad signature")]
    BadSignature,
    /// Header algorithm is not HS256.
    #[error("wrong algorithm")]
    WrongAlgorithm,
    /// Issuer or audience does not match the configured values.
    #[error("claim mismatch")]
    ClaimMismatch,
    /// Token is structurally invalid.
    #[error("malformed token")]
    Malformed,
    /// Subject claim is not a numeric user id.
    #[error("bad subject")]
    BadSubject,
}

/// Validates HS256 session tokens.
///
/// Expiry is checked with zero leeway: a token is invalid the instant its
/// `exp` passes.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    validation_ignoring_expiry: Validation,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);

        let mut validation_ignoring_expiry = validation.clone();
        validation_ignoring_expiry.validate_exp = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            validation_ignoring_expiry,
        }
    }

    /// Fully validate a token and extract the numeric subject.
    ///
    /// Checks signature, expiry, issuer, and audience.
    pub fn validate(&self, token: &str) -> Result<i64, RejectReason> {
        self.decode(token, &self.validation)
    }

    /// Validate everything except expiry.
    ///
    /// Used on the refresh path, where an expired session token is still
    /// acceptable proof of the claimed identity as long as its signature
    /// and issuer/audience claims hold.
    pub fn validate_ignoring_expiry(&self, token: &str) -> Result<i64, RejectReason> {
        self.decode(token, &self.validation_ignoring_expiry)
    }

    /// Fully validate a token and return the complete claim set.
    pub fn validate_claims(&self, token: &str) -> Result<Claims, RejectReason> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(map_error)
    }

    fn decode(&self, token: &str, validation: &Validation) -> Result<i64, RejectReason> {
        let claims = decode::<Claims>(token, &self.decoding_key, validation)
            .map_err(map_error)?
            .claims;
        claims.user_id().ok_or(RejectReason::BadSubject)
    }
}

fn map_error(e: jsonwebtoken::errors::Error) -> RejectReason {
    use jsonwebtoken::errors::ErrorKind;
    match e.kind() {
        ErrorKind::ExpiredSignature => RejectReason::Expired,
        ErrorKind::InvalidSignature => RejectReason::BadSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            RejectReason::WrongAlgorithm
        }
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => RejectReason::ClaimMismatch,
        _ => RejectReason::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::super::issuer::TokenIssuer;
    use super::*;
    use chrono::Utc;
    use vaultgate_entity::user::{User, UserRole};

    fn config(ttl_seconds: u64) -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret-at-least-32-bytes".to_string(),
            jwt_issuer: "vaultgate".to_string(),
            jwt_audience: "vaultgate-clients".to_string(),
            access_token_ttl_seconds: ttl_seconds,
            refresh_token_ttl_days: 7,
            password_min_length: 8,
        }
    }

    fn user() -> User {
        User {
            id: 42,
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: UserRole::Admin,
            refresh_token: None,
            refresh_token_expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn valid_token_yields_subject() {
        let cfg = config(7200);
        let issuer = TokenIssuer::new(&cfg);
        let validator = TokenValidator::new(&cfg);

        let (token, _) = issuer.issue(&user()).unwrap();
        assert_eq!(validator.validate(&token).unwrap(), 42);
    }

    #[test]
    fn claims_carry_identity() {
        let cfg = config(7200);
        let issuer = TokenIssuer::new(&cfg);
        let validator = TokenValidator::new(&cfg);

        let (token, _) = issuer.issue(&user()).unwrap();
        let claims = validator.validate_claims(&token).unwrap();
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.name, "Ada Lovelace");
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.iss, "vaultgate");
    }

    #[test]
    fn wrong_secret_is_bad_signature() {
        let issuer = TokenIssuer::new(&config(7200));
        let mut other = config(7200);
        other.jwt_secret = "a-completely-different-secret-value".to_string();
        let validator = TokenValidator::new(&other);

        let (token, _) = issuer.issue(&user()).unwrap();
        assert_eq!(
            validator.validate(&token).unwrap_err(),
            RejectReason::BadSignature
        );
    }

    #[test]
    fn wrong_issuer_is_claim_mismatch() {
        let issuer = TokenIssuer::new(&config(7200));
        let mut other = config(7200);
        other.jwt_issuer = "someone-else".to_string();
        let validator = TokenValidator::new(&other);

        let (token, _) = issuer.issue(&user()).unwrap();
        assert_eq!(
            validator.validate(&token).unwrap_err(),
            RejectReason::ClaimMismatch
        );
    }

    #[test]
    fn garbage_is_malformed() {
        let validator = TokenValidator::new(&config(7200));
        assert_eq!(
            validator.validate("not.a.token").unwrap_err(),
            RejectReason::Malformed
        );
    }

    #[tokio::test]
    async fn expired_token_rejected_but_passes_expiry_exempt_path() {
        let cfg = config(1);
        let issuer = TokenIssuer::new(&cfg);
        let validator = TokenValidator::new(&cfg);

        let (token, _) = issuer.issue(&user()).unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;

        assert_eq!(
            validator.validate(&token).unwrap_err(),
            RejectReason::Expired
        );
        assert_eq!(validator.validate_ignoring_expiry(&token).unwrap(), 42);
    }
}
