//! Response sealing helpers.
//!
//! Success and error bodies alike leave the server inside the encrypted
//! envelope, so the two are indistinguishable on the wire except for the
//! HTTP status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use vaultgate_auth::EnvelopeCodec;

use crate::dto::{EncryptedEnvelope, ErrorBody};

/// Seal a value and return it as `{"data": ...}` with the given status.
///
/// Sealing only fails if serialization does, which would be a programming
/// error; it degrades to a bare 500 rather than leaking plaintext.
pub fn sealed(codec: &EnvelopeCodec, status: StatusCode, value: &impl Serialize) -> Response {
    match codec.seal(value) {
        Ok(data) => (status, Json(EncryptedEnvelope { data })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to seal response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Seal an error message as `{"error": msg}` with the given status.
pub fn sealed_error(codec: &EnvelopeCodec, status: StatusCode, message: &str) -> Response {
    sealed(
        codec,
        status,
        &ErrorBody {
            error: message.to_string(),
        },
    )
}
