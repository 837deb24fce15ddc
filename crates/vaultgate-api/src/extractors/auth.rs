//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, fully validates it, and injects the user record.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Response;

use vaultgate_entity::user::User;

use crate::envelope::sealed_error;
use crate::state::AppState;

/// Extracted authenticated user available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl std::ops::Deref for AuthUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    // Rejections are encrypted envelopes like every other response, so
    // the impl builds the full response itself.
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized = || sealed_error(&state.codec, StatusCode::UNAUTHORIZED, "Invalid token");

        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(unauthorized)?;

        let user = state.auth_service.authenticate(token).await.map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            unauthorized()
        })?;

        Ok(AuthUser(user))
    }
}
