//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use vaultgate_auth::EnvelopeCodec;
use vaultgate_core::config::AppConfig;
use vaultgate_service::AuthService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Transport envelope codec.
    pub codec: Arc<EnvelopeCodec>,
    /// Authentication orchestrator.
    pub auth_service: Arc<AuthService>,
}
