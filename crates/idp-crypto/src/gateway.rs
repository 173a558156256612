//! Transport-safe encryption of short secrets.
//!
//! The gateway is the only path through which sensitive authenticator
//! secrets move; the configuration layer never handles them in
//! cleartext.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::cipher::CipherService;
use crate::error::CryptoResult;

/// Encrypts and decrypts short opaque strings for storage at rest.
///
/// The transport form is the base64 encoding of the cipher's binary
/// output; `decrypt` accepts that form and no other.
#[derive(Clone)]
pub struct CryptoGateway {
    cipher: Arc<dyn CipherService>,
}

impl std::fmt::Debug for CryptoGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoGateway").finish_non_exhaustive()
    }
}

impl CryptoGateway {
    /// Creates a gateway over the given cipher service.
    #[must_use]
    pub fn new(cipher: Arc<dyn CipherService>) -> Self {
        Self { cipher }
    }

    /// Encrypts a plaintext string to its transport-safe text form.
    ///
    /// ## Errors
    ///
    /// Returns `CryptoError::Cipher` if the underlying cipher rejects the
    /// input.
    pub fn encrypt(&self, plaintext: &str) -> CryptoResult<String> {
        let sealed = self.cipher.encrypt(plaintext.as_bytes())?;
        Ok(STANDARD.encode(sealed))
    }

    /// Decrypts a transport-safe text form back to the plaintext string.
    ///
    /// ## Errors
    ///
    /// Returns `CryptoError::Encoding` for malformed base64,
    /// `CryptoError::Cipher` for ciphertexts that fail authentication and
    /// `CryptoError::InvalidUtf8` when the decrypted bytes are not UTF-8.
    pub fn decrypt(&self, transport: &str) -> CryptoResult<String> {
        let sealed = STANDARD.decode(transport)?;
        let plaintext = self.cipher.decrypt(&sealed)?;
        Ok(String::from_utf8(plaintext)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::AesGcmCipher;
    use crate::error::CryptoError;

    fn test_gateway() -> CryptoGateway {
        CryptoGateway::new(Arc::new(AesGcmCipher::new(&[42u8; 32]).unwrap()))
    }

    #[test]
    fn round_trip_preserves_secret() {
        let gateway = test_gateway();
        for secret in ["JBSWY3DPEHPK3PXP", "", "pässwörd", "秘密の種"] {
            let transport = gateway.encrypt(secret).unwrap();
            assert_eq!(gateway.decrypt(&transport).unwrap(), secret);
        }
    }

    #[test]
    fn transport_form_is_base64() {
        let gateway = test_gateway();
        let transport = gateway.encrypt("seed").unwrap();
        assert!(STANDARD.decode(&transport).is_ok());
    }

    #[test]
    fn malformed_transport_is_an_encoding_error() {
        let gateway = test_gateway();
        let result = gateway.decrypt("not base64 %%%");
        assert!(matches!(result, Err(CryptoError::Encoding(_))));
    }

    #[test]
    fn foreign_ciphertext_is_rejected() {
        let gateway = test_gateway();
        let other = CryptoGateway::new(Arc::new(AesGcmCipher::new(&[9u8; 32]).unwrap()));
        let transport = other.encrypt("seed").unwrap();
        assert!(matches!(
            gateway.decrypt(&transport),
            Err(CryptoError::Cipher(_))
        ));
    }
}
