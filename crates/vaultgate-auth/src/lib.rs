//! # vaultgate-auth
//!
//! Cryptographic building blocks for the VaultGate gateway.
//!
//! ## Modules
//!
//! - `envelope` — AES-256-CBC transport envelope sealing and opening
//! - `jwt` — session token issuance and validation (HS256)
//! - `password` — Argon2id password hashing and verification
//! - `refresh` — opaque refresh token generation, rotation, and verification

pub mod envelope;
pub mod jwt;
pub mod password;
pub mod refresh;

pub use envelope::{DecryptError, EnvelopeCodec};
pub use jwt::{Claims, RejectReason, TokenIssuer, TokenValidator};
pub use password::PasswordHasher;
pub use refresh::RefreshTokenManager;
