//! # vaultgate-api
//!
//! HTTP surface for VaultGate. Contains the Axum router, application
//! state, DTOs, the bearer-token extractor, handlers, and middleware.
//! All protected request and response bodies travel inside the encrypted
//! envelope; only the health probe speaks plaintext.

pub mod dto;
pub mod envelope;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
