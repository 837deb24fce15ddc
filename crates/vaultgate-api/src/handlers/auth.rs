//! Authentication endpoints.
//!
//! Every body in and out of these handlers is an encrypted envelope.
//! Auth failures are rendered as encrypted `{"error": msg}` bodies with
//! deliberately coarse messages; only store failures propagate as
//! `AppError` to the plain 500 path.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use validator::Validate;

use vaultgate_core::error::ErrorKind;
use vaultgate_service::AuthError;

use crate::dto::{
    AuthResponse, EncryptedEnvelope, LoginRequest, ProfileResponse, RefreshRequest,
    RegisterRequest,
};
use crate::envelope::{sealed, sealed_error};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<EncryptedEnvelope>,
) -> Result<Response, ApiError> {
    let request: RegisterRequest = match state.codec.open(&body.data) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(detail = e.detail(), "Register body rejected");
            return Ok(sealed_error(
                &state.codec,
                StatusCode::BAD_REQUEST,
                "Invalid encrypted data",
            ));
        }
    };

    // Minimum password length comes from configuration, the rest of the
    // field checks are declared on the DTO.
    let password_too_short =
        request.password.chars().count() < state.config.auth.password_min_length;
    if request.validate().is_err() || password_too_short {
        return Ok(sealed_error(
            &state.codec,
            StatusCode::BAD_REQUEST,
            "Validation failed",
        ));
    }

    match state
        .auth_service
        .register(
            &request.email,
            &request.password,
            &request.first_name,
            &request.last_name,
        )
        .await
    {
        Ok(tokens) => Ok(sealed(
            &state.codec,
            StatusCode::OK,
            &AuthResponse::from(tokens),
        )),
        Err(AuthError::EmailTaken) => Ok(sealed_error(
            &state.codec,
            StatusCode::BAD_REQUEST,
            "User with this email already exists",
        )),
        // The pre-insert check can lose to a concurrent registration; the
        // unique constraint then surfaces as a store conflict. The loser
        // gets the same enveloped response as a plain duplicate.
        Err(AuthError::Store(e)) if e.kind == ErrorKind::Conflict => Ok(sealed_error(
            &state.codec,
            StatusCode::BAD_REQUEST,
            "User with this email already exists",
        )),
        Err(AuthError::Store(e)) => Err(e.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Unexpected registration failure");
            Ok(sealed_error(
                &state.codec,
                StatusCode::BAD_REQUEST,
                "Registration failed",
            ))
        }
    }
}

/// `POST /api/auth/login`
///
/// Unknown email and wrong password produce byte-identical responses.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<EncryptedEnvelope>,
) -> Result<Response, ApiError> {
    let request: LoginRequest = match state.codec.open(&body.data) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(detail = e.detail(), "Login body rejected");
            return Ok(sealed_error(
                &state.codec,
                StatusCode::BAD_REQUEST,
                "Invalid encrypted data",
            ));
        }
    };

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(tokens) => Ok(sealed(
            &state.codec,
            StatusCode::OK,
            &AuthResponse::from(tokens),
        )),
        Err(AuthError::Store(e)) => Err(e.into()),
        Err(_) => Ok(sealed_error(
            &state.codec,
            StatusCode::UNAUTHORIZED,
            "Invalid email or password",
        )),
    }
}

/// `POST /api/auth/refresh`
///
/// Every rejection collapses to the same "Invalid token" body, whether
/// the session token failed validation, the subject is gone, the refresh
/// token mismatched, or a concurrent rotation won the race.
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<EncryptedEnvelope>,
) -> Result<Response, ApiError> {
    let request: RefreshRequest = match state.codec.open(&body.data) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(detail = e.detail(), "Refresh body rejected");
            return Ok(sealed_error(
                &state.codec,
                StatusCode::BAD_REQUEST,
                "Invalid encrypted data",
            ));
        }
    };

    match state
        .auth_service
        .refresh(&request.token, &request.refresh_token)
        .await
    {
        Ok(tokens) => Ok(sealed(
            &state.codec,
            StatusCode::OK,
            &AuthResponse::from(tokens),
        )),
        Err(AuthError::Store(e)) => Err(e.into()),
        Err(_) => Ok(sealed_error(
            &state.codec,
            StatusCode::BAD_REQUEST,
            "Invalid token",
        )),
    }
}

/// `GET /api/auth/profile`
pub async fn profile(State(state): State<AppState>, user: AuthUser) -> Response {
    sealed(
        &state.codec,
        StatusCode::OK,
        &ProfileResponse::from(user.profile()),
    )
}
