#![allow(dead_code)]
//! Shared helpers for HTTP-level tests.
//!
//! Builds the real router on top of the in-memory user store, so the
//! full stack — envelope codec, handlers, extractors, middleware — runs
//! without PostgreSQL.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use http::{Request, StatusCode};
use serde::Serialize;
use tower::ServiceExt;

use vaultgate_api::{build_router, AppState};
use vaultgate_auth::{
    EnvelopeCodec, PasswordHasher, RefreshTokenManager, TokenIssuer, TokenValidator,
};
use vaultgate_core::config::app::{CorsConfig, ServerConfig};
use vaultgate_core::config::auth::AuthConfig;
use vaultgate_core::config::crypto::CryptoConfig;
use vaultgate_core::config::logging::LoggingConfig;
use vaultgate_core::config::{AppConfig, DatabaseConfig};
use vaultgate_core::traits::UserStore;
use vaultgate_database::MemoryUserStore;
use vaultgate_service::AuthService;

/// A fully wired application over an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub codec: Arc<EnvelopeCodec>,
}

impl TestApp {
    /// Build an app with the default 2-hour session token TTL.
    pub fn spawn() -> Self {
        Self::with_access_ttl(7200)
    }

    /// Build an app with a custom session token TTL in seconds.
    pub fn with_access_ttl(access_token_ttl_seconds: u64) -> Self {
        Self::build(
            test_config(access_token_ttl_seconds),
            Arc::new(MemoryUserStore::new()),
        )
    }

    /// Build an app over an arbitrary store implementation.
    pub fn with_store(store: Arc<dyn UserStore>) -> Self {
        Self::build(test_config(7200), store)
    }

    fn build(config: AppConfig, store: Arc<dyn UserStore>) -> Self {
        let codec = Arc::new(
            EnvelopeCodec::from_config(&config.crypto).expect("test key material is valid"),
        );
        let auth_service = Arc::new(AuthService::new(
            store,
            Arc::new(PasswordHasher::new()),
            Arc::new(TokenIssuer::new(&config.auth)),
            Arc::new(TokenValidator::new(&config.auth)),
            Arc::new(RefreshTokenManager::new(&config.auth)),
        ));

        let router = build_router(AppState {
            config: Arc::new(config),
            codec: Arc::clone(&codec),
            auth_service,
        });

        Self { router, codec }
    }

    /// POST a sealed body and return the status plus opened response body.
    pub async fn post_sealed(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> (StatusCode, serde_json::Value) {
        let data = self.codec.seal(body).expect("seal request body");
        let envelope = serde_json::json!({ "data": data });

        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(envelope.to_string()))
            .expect("build request");

        self.send_and_open(request).await
    }

    /// GET with an optional bearer token; opens the response envelope.
    pub async fn get_sealed(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(token) = bearer {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = builder.body(Body::empty()).expect("build request");

        self.send_and_open(request).await
    }

    /// GET returning the raw plaintext JSON body (for the health probe).
    pub async fn get_plain(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router never fails");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes).expect("plain JSON body");
        (status, body)
    }

    /// The raw envelope body of a request, without opening it.
    pub async fn post_sealed_raw(&self, path: &str, body: &impl Serialize) -> (StatusCode, String) {
        let data = self.codec.seal(body).expect("seal request body");
        let envelope = serde_json::json!({ "data": data });

        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(envelope.to_string()))
            .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router never fails");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let envelope: serde_json::Value = serde_json::from_slice(&bytes).expect("envelope body");
        let data = envelope["data"].as_str().expect("data field").to_string();
        (status, data)
    }

    async fn send_and_open(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router never fails");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let envelope: serde_json::Value = serde_json::from_slice(&bytes).expect("envelope body");
        let data = envelope["data"].as_str().expect("data field");
        let opened = self.codec.open(data).expect("open response envelope");
        (status, opened)
    }
}

/// Register a user and return the opened auth response.
pub async fn register(app: &TestApp, email: &str) -> serde_json::Value {
    let (status, body) = app
        .post_sealed(
            "/api/auth/register",
            &serde_json::json!({
                "email": email,
                "password": "correct horse",
                "firstName": "Ada",
                "lastName": "Lovelace",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    body
}

fn test_config(access_token_ttl_seconds: u64) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_seconds: 30,
            cors: CorsConfig::default(),
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 1,
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret-32-bytes!".to_string(),
            jwt_issuer: "vaultgate".to_string(),
            jwt_audience: "vaultgate-clients".to_string(),
            access_token_ttl_seconds,
            refresh_token_ttl_days: 7,
            password_min_length: 8,
        },
        crypto: CryptoConfig {
            key: BASE64.encode([11u8; 32]),
            iv: BASE64.encode([13u8; 16]),
        },
        logging: LoggingConfig::default(),
    }
}
