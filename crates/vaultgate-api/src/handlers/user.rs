//! User directory endpoints (bearer-protected).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use vaultgate_core::error::AppError;
use vaultgate_service::AuthError;

use crate::dto::UsersResponse;
use crate::envelope::{sealed, sealed_error};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `GET /api/users`
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Response, ApiError> {
    let users = state.auth_service.list_users().await.map_err(store_error)?;
    Ok(sealed(
        &state.codec,
        StatusCode::OK,
        &UsersResponse { users },
    ))
}

/// `GET /api/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    match state.auth_service.find_user(id).await.map_err(store_error)? {
        Some(profile) => Ok(sealed(&state.codec, StatusCode::OK, &profile)),
        None => Ok(sealed_error(
            &state.codec,
            StatusCode::NOT_FOUND,
            "User not found",
        )),
    }
}

// The directory operations only fail through the store.
fn store_error(e: AuthError) -> AppError {
    match e {
        AuthError::Store(e) => e,
        other => AppError::internal(format!("Unexpected directory failure: {other}")),
    }
}
