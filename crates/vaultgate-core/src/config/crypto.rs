//! Transport encryption configuration.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Transport encryption key material.
///
/// Both fields are base64-encoded and have no defaults: the process
/// refuses to start without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoConfig {
    /// Base64-encoded 32-byte AES-256 key.
    pub key: String,
    /// Base64-encoded 16-byte initialization vector.
    pub iv: String,
}

impl CryptoConfig {
    /// Decode and length-check the key material.
    ///
    /// Called once at startup so a malformed key fails the boot rather
    /// than the first request.
    pub fn validate(&self) -> Result<(), AppError> {
        let key = self.key_bytes()?;
        if key.len() != 32 {
            return Err(AppError::configuration(format!(
                "crypto.key must decode to 32 bytes, got {}",
                key.len()
            )));
        }
        let iv = self.iv_bytes()?;
        if iv.len() != 16 {
            return Err(AppError::configuration(format!(
                "crypto.iv must decode to 16 bytes, got {}",
                iv.len()
            )));
        }
        Ok(())
    }

    /// Decode the AES key from base64.
    pub fn key_bytes(&self) -> Result<Vec<u8>, AppError> {
        BASE64
            .decode(&self.key)
            .map_err(|e| AppError::configuration(format!("crypto.key is not valid base64: {e}")))
    }

    /// Decode the initialization vector from base64.
    pub fn iv_bytes(&self) -> Result<Vec<u8>, AppError> {
        BASE64
            .decode(&self.iv)
            .map_err(|e| AppError::configuration(format!("crypto.iv is not valid base64: {e}")))
    }
}
