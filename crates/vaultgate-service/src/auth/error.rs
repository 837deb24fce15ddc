//! Internal authentication error taxonomy.

use thiserror::Error;

use vaultgate_auth::RejectReason;
use vaultgate_core::error::AppError;

/// Rich internal outcome of an authentication flow.
///
/// The API layer collapses these into coarse public responses: unknown
/// email and wrong password become the same "Invalid email or password";
/// every refresh failure becomes "Invalid token". Tests assert on the
/// precise variant, clients never see it.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login email does not exist.
    #[error("unknown email")]
    UnknownEmail,
    /// Login password does not match the stored hash.
    #[error("wrong password")]
    WrongPassword,
    /// Registration email is already in use.
    #[error("email already registered")]
    EmailTaken,
    /// The presented session token failed validation.
    #[error("session token rejected: {0}")]
    TokenRejected(RejectReason),
    /// The token's subject does not resolve to a stored user.
    #[error("unknown subject")]
    UnknownSubject,
    /// The refresh token did not match the stored slot or was expired.
    #[error("refresh token rejected")]
    RefreshRejected,
    /// A concurrent rotation consumed the refresh token first.
    #[error("refresh rotation conflict")]
    RotationConflict,
    /// The backing store failed.
    #[error("store error: {0}")]
    Store(#[from] AppError),
}
