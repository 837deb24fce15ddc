//! # vaultgate-service
//!
//! Authentication orchestration: registration, login, token refresh, and
//! profile retrieval, composed from the cryptographic building blocks in
//! `vaultgate-auth` and the `UserStore` trait in `vaultgate-core`.

pub mod auth;

pub use auth::{AuthError, AuthService, SessionTokens};
