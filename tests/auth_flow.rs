//! End-to-end authentication flows over the real router.

mod common;

use http::StatusCode;
use serde_json::json;

use common::{register, TestApp};

#[tokio::test]
async fn register_then_profile() {
    let app = TestApp::spawn();
    let auth = register(&app, "ada@example.com").await;

    assert!(auth["token"].is_string());
    assert!(auth["refreshToken"].is_string());
    assert_eq!(auth["user"]["email"], "ada@example.com");
    assert_eq!(auth["user"]["firstName"], "Ada");
    assert_eq!(auth["user"]["role"], "User");

    let token = auth["token"].as_str().unwrap();
    let (status, profile) = app.get_sealed("/api/auth/profile", Some(token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], "ada@example.com");
    assert_eq!(profile["firstName"], "Ada");
    assert_eq!(profile["lastName"], "Lovelace");
    // The profile view does not expose the role.
    assert!(profile.get("role").is_none());
}

#[tokio::test]
async fn duplicate_registration_rejected() {
    let app = TestApp::spawn();
    register(&app, "ada@example.com").await;

    let (status, body) = app
        .post_sealed(
            "/api/auth/register",
            &json!({
                "email": "ada@example.com",
                "password": "other password",
                "firstName": "Eva",
                "lastName": "Byron",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User with this email already exists");
}

#[tokio::test]
async fn registration_validates_input() {
    let app = TestApp::spawn();

    let (status, body) = app
        .post_sealed(
            "/api/auth/register",
            &json!({
                "email": "not-an-email",
                "password": "short",
                "firstName": "",
                "lastName": "",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
}

#[tokio::test]
async fn password_minimum_length_comes_from_config() {
    let app = TestApp::spawn();

    // One character below the configured minimum of 8.
    let (status, body) = app
        .post_sealed(
            "/api/auth/register",
            &json!({
                "email": "ada@example.com",
                "password": "seven77",
                "firstName": "Ada",
                "lastName": "Lovelace",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");

    // Exactly at the minimum.
    let (status, _) = app
        .post_sealed(
            "/api/auth/register",
            &json!({
                "email": "ada@example.com",
                "password": "eight888",
                "firstName": "Ada",
                "lastName": "Lovelace",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

/// Store that behaves like the losing side of a registration race: the
/// pre-insert email check sees nothing, then the unique constraint fires.
#[derive(Debug)]
struct RacingStore;

#[async_trait::async_trait]
impl vaultgate_core::traits::UserStore for RacingStore {
    async fn find_by_id(
        &self,
        _id: i64,
    ) -> vaultgate_core::AppResult<Option<vaultgate_entity::user::User>> {
        Ok(None)
    }

    async fn find_by_email(
        &self,
        _email: &str,
    ) -> vaultgate_core::AppResult<Option<vaultgate_entity::user::User>> {
        Ok(None)
    }

    async fn find_all(&self) -> vaultgate_core::AppResult<Vec<vaultgate_entity::user::User>> {
        Ok(Vec::new())
    }

    async fn insert(
        &self,
        _user: &vaultgate_entity::user::NewUser,
    ) -> vaultgate_core::AppResult<vaultgate_entity::user::User> {
        Err(vaultgate_core::AppError::conflict("Email already in use"))
    }

    async fn update_refresh_token(
        &self,
        _id: i64,
        _token: Option<&str>,
        _expires_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> vaultgate_core::AppResult<()> {
        Ok(())
    }

    async fn swap_refresh_token(
        &self,
        _id: i64,
        _previous: &str,
        _token: &str,
        _expires_at: chrono::DateTime<chrono::Utc>,
    ) -> vaultgate_core::AppResult<bool> {
        Ok(false)
    }
}

#[tokio::test]
async fn lost_registration_race_is_an_enveloped_conflict() {
    let app = TestApp::with_store(std::sync::Arc::new(RacingStore));

    let (status, body) = app
        .post_sealed(
            "/api/auth/register",
            &json!({
                "email": "ada@example.com",
                "password": "correct horse",
                "firstName": "Ada",
                "lastName": "Lovelace",
            }),
        )
        .await;

    // The loser sees the same encrypted body as a plain duplicate, never
    // a plaintext store error.
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User with this email already exists");
}

#[tokio::test]
async fn login_returns_fresh_credentials() {
    let app = TestApp::spawn();
    register(&app, "ada@example.com").await;

    let (status, body) = app
        .post_sealed(
            "/api/auth/login",
            &json!({ "email": "ada@example.com", "password": "correct horse" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["id"], 1);
}

#[tokio::test]
async fn credential_failures_are_byte_identical() {
    let app = TestApp::spawn();
    register(&app, "ada@example.com").await;

    let (unknown_status, unknown_body) = app
        .post_sealed_raw(
            "/api/auth/login",
            &json!({ "email": "ghost@example.com", "password": "correct horse" }),
        )
        .await;
    let (wrong_status, wrong_body) = app
        .post_sealed_raw(
            "/api/auth/login",
            &json!({ "email": "ada@example.com", "password": "wrong password" }),
        )
        .await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    // Fixed IV means identical plaintext seals to identical ciphertext,
    // so the two failure bodies are indistinguishable on the wire.
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn login_email_is_case_sensitive() {
    let app = TestApp::spawn();
    register(&app, "Ada@example.com").await;

    let (status, body) = app
        .post_sealed(
            "/api/auth/login",
            &json!({ "email": "ada@example.com", "password": "correct horse" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn garbage_envelope_is_rejected_opaquely() {
    let app = TestApp::spawn();

    // Bypass the helper's sealing: send a syntactically valid envelope
    // whose data is not our ciphertext.
    let request = http::Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            json!({ "data": "bm90IGEgcmVhbCBjaXBoZXJ0ZXh0" }).to_string(),
        ))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let envelope: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let body: serde_json::Value = app.codec.open(envelope["data"].as_str().unwrap()).unwrap();
    assert_eq!(body["error"], "Invalid encrypted data");
}

#[tokio::test]
async fn refresh_rotates_and_old_pair_dies() {
    let app = TestApp::spawn();
    let auth = register(&app, "ada@example.com").await;
    let token = auth["token"].as_str().unwrap();
    let refresh_token = auth["refreshToken"].as_str().unwrap();

    let (status, renewed) = app
        .post_sealed(
            "/api/auth/refresh",
            &json!({ "token": token, "refreshToken": refresh_token }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(renewed["refreshToken"], auth["refreshToken"]);

    // Replaying the consumed pair fails.
    let (status, body) = app
        .post_sealed(
            "/api/auth/refresh",
            &json!({ "token": token, "refreshToken": refresh_token }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid token");

    // The rotated pair works.
    let (status, _) = app
        .post_sealed(
            "/api/auth/refresh",
            &json!({
                "token": renewed["token"],
                "refreshToken": renewed["refreshToken"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn expired_session_token_still_refreshes() {
    let app = TestApp::with_access_ttl(1);
    let auth = register(&app, "ada@example.com").await;
    let token = auth["token"].as_str().unwrap();

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    // The token is now past its expiry with zero leeway.
    let (status, body) = app.get_sealed("/api/auth/profile", Some(token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");

    // But the refresh path accepts it alongside the refresh token.
    let (status, renewed) = app
        .post_sealed(
            "/api/auth/refresh",
            &json!({ "token": token, "refreshToken": auth["refreshToken"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(renewed["token"].is_string());
}

#[tokio::test]
async fn profile_requires_bearer_token() {
    let app = TestApp::spawn();

    let (status, body) = app.get_sealed("/api/auth/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");

    let (status, body) = app
        .get_sealed("/api/auth/profile", Some("forged.token.value"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn health_is_plaintext() {
    let app = TestApp::spawn();
    let (status, body) = app.get_plain("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
