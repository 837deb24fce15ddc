//! # vaultgate-core
//!
//! Core crate for VaultGate. Contains configuration schemas, the collaborator
//! trait for the user-record store, and the unified error system.
//!
//! This crate depends only on `vaultgate-entity` internally.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
