//! Liveness probe. Plaintext, no auth, no envelope.

use axum::Json;
use serde_json::{json, Value};

/// `GET /api/health`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
