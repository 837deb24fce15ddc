//! AES-256-CBC transport envelope.
//!
//! Every protected request and response body travels as
//! `{"data": "<base64 ciphertext>"}`. Sealing serializes a value to JSON,
//! encrypts it, and base64-encodes the result; opening reverses the chain.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use vaultgate_core::config::crypto::CryptoConfig;
use vaultgate_core::error::AppError;
use vaultgate_core::result::AppResult;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Failure to open an envelope.
///
/// The reason is kept internal; the display text is identical for every
/// failure mode so a caller probing the endpoint cannot distinguish a bad
/// base64 payload from a padding failure or an unexpected plaintext shape.
#[derive(Debug, Error)]
#[error("Invalid encrypted data")]
pub struct DecryptError {
    reason: DecryptFailure,
}

#[derive(Debug)]
enum DecryptFailure {
    Encoding,
    Cipher,
    Shape,
}

impl DecryptError {
    fn encoding() -> Self {
        Self {
            reason: DecryptFailure::Encoding,
        }
    }

    fn cipher() -> Self {
        Self {
            reason: DecryptFailure::Cipher,
        }
    }

    fn shape() -> Self {
        Self {
            reason: DecryptFailure::Shape,
        }
    }

    /// Internal failure category, for logging at the service boundary.
    pub fn detail(&self) -> &'static str {
        match self.reason {
            DecryptFailure::Encoding => "base64 decode failed",
            DecryptFailure::Cipher => "decryption or padding failed",
            DecryptFailure::Shape => "plaintext was not the expected JSON shape",
        }
    }
}

/// Seals and opens transport envelopes with a static AES-256 key.
///
/// The key and IV are fixed for the deployment. The codec is immutable
/// after construction and cheap to share behind an `Arc`.
#[derive(Clone)]
pub struct EnvelopeCodec {
    key: [u8; 32],
    iv: [u8; 16],
}

impl std::fmt::Debug for EnvelopeCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeCodec").finish_non_exhaustive()
    }
}

impl EnvelopeCodec {
    /// Build a codec from validated configuration.
    ///
    /// Bad or missing key material is a configuration error; `main` treats
    /// it as fatal before the server starts.
    pub fn from_config(config: &CryptoConfig) -> AppResult<Self> {
        config.validate()?;
        let key_bytes = config.key_bytes()?;
        let iv_bytes = config.iv_bytes()?;

        let mut key = [0u8; 32];
        key.copy_from_slice(&key_bytes);
        let mut iv = [0u8; 16];
        iv.copy_from_slice(&iv_bytes);

        Ok(Self { key, iv })
    }

    /// Serialize a value to JSON and encrypt it into a base64 envelope body.
    pub fn seal<T: Serialize>(&self, value: &T) -> AppResult<String> {
        let plaintext = serde_json::to_vec(value)?;
        let ciphertext = Aes256CbcEnc::new_from_slices(&self.key, &self.iv)
            .map_err(|e| AppError::internal(format!("Failed to initialize cipher: {e}")))?
            .encrypt_padded_vec_mut::<Pkcs7>(&plaintext);
        Ok(BASE64.encode(ciphertext))
    }

    /// Decrypt a base64 envelope body and deserialize the plaintext.
    pub fn open<T: DeserializeOwned>(&self, data: &str) -> Result<T, DecryptError> {
        let ciphertext = BASE64.decode(data).map_err(|_| DecryptError::encoding())?;
        let plaintext = Aes256CbcDec::new_from_slices(&self.key, &self.iv)
            .map_err(|_| DecryptError::cipher())?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| DecryptError::cipher())?;
        serde_json::from_slice(&plaintext).map_err(|_| DecryptError::shape())
    }
}
