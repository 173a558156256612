//! Cryptographic error types.

use thiserror::Error;

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors raised by the cipher service and the crypto gateway.
///
/// Errors surface unchanged to the caller; there are no retries.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The underlying cipher rejected the input.
    #[error("cipher operation failed: {0}")]
    Cipher(String),

    /// The transport form could not be decoded.
    #[error("invalid transport encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// Decrypted bytes were not valid UTF-8.
    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The provided key material is unusable.
    #[error("invalid key material: {0}")]
    InvalidKey(String),
}
