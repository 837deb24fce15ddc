//! VaultGate Server — Encrypted Authentication Gateway
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use vaultgate_api::AppState;
use vaultgate_auth::{
    EnvelopeCodec, PasswordHasher, RefreshTokenManager, TokenIssuer, TokenValidator,
};
use vaultgate_core::config::AppConfig;
use vaultgate_core::error::AppError;
use vaultgate_core::traits::UserStore;
use vaultgate_database::{DatabasePool, PgUserStore};
use vaultgate_service::AuthService;

#[tokio::main]
async fn main() {
    let env = std::env::var("VAULTGATE_ENV").unwrap_or_else(|_| "development".to_string());

    // Secrets and key material have no defaults; a bad or missing value
    // stops the process here, before anything listens.
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting VaultGate v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db_pool = DatabasePool::connect(&config.database).await?;
    vaultgate_database::migration::run_migrations(db_pool.pool()).await?;

    // ── Crypto and auth collaborators ────────────────────────────
    let codec = Arc::new(EnvelopeCodec::from_config(&config.crypto)?);
    let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(db_pool.pool().clone()));
    let auth_service = Arc::new(AuthService::new(
        store,
        Arc::new(PasswordHasher::new()),
        Arc::new(TokenIssuer::new(&config.auth)),
        Arc::new(TokenValidator::new(&config.auth)),
        Arc::new(RefreshTokenManager::new(&config.auth)),
    ));

    // ── Build and start HTTP server ──────────────────────────────
    let app_state = AppState {
        config: Arc::new(config.clone()),
        codec,
        auth_service,
    };

    let app = vaultgate_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("VaultGate server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    tracing::info!("VaultGate server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
