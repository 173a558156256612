//! Cipher service seam and the default AES-256-GCM implementation.

use aws_lc_rs::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use aws_lc_rs::rand::{SecureRandom, SystemRandom};

use crate::error::{CryptoError, CryptoResult};

/// Process-wide symmetric cipher service.
///
/// Implementations must be thread-safe; one instance serves every
/// authentication attempt in the process.
pub trait CipherService: Send + Sync {
    /// Encrypts a plaintext payload.
    ///
    /// ## Errors
    ///
    /// Returns `CryptoError::Cipher` if the underlying cipher rejects the
    /// input.
    fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>>;

    /// Decrypts a ciphertext payload produced by [`CipherService::encrypt`].
    ///
    /// ## Errors
    ///
    /// Returns `CryptoError::Cipher` if the payload is truncated or fails
    /// authentication.
    fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Vec<u8>>;
}

/// AES-256-GCM cipher backed by `aws-lc-rs`.
///
/// The binary output is `nonce || ciphertext || tag`; the nonce is
/// generated freshly for every encryption.
pub struct AesGcmCipher {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl std::fmt::Debug for AesGcmCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material through Debug.
        f.debug_struct("AesGcmCipher").finish_non_exhaustive()
    }
}

impl AesGcmCipher {
    /// Creates a cipher from 32 bytes of key material.
    ///
    /// ## Errors
    ///
    /// Returns `CryptoError::InvalidKey` if the key is rejected.
    pub fn new(key_material: &[u8; 32]) -> CryptoResult<Self> {
        let unbound = UnboundKey::new(&AES_256_GCM, key_material)
            .map_err(|_| CryptoError::InvalidKey("AES-256-GCM key rejected".to_string()))?;
        Ok(Self {
            key: LessSafeKey::new(unbound),
            rng: SystemRandom::new(),
        })
    }
}

impl CipherService for AesGcmCipher {
    fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| CryptoError::Cipher("nonce generation failed".to_string()))?;

        let nonce = Nonce::assume_unique_for_key(nonce_bytes);
        let mut in_out = plaintext.to_vec();
        self.key
            .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| CryptoError::Cipher("encryption failed".to_string()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + in_out.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&in_out);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        if ciphertext.len() < NONCE_LEN {
            return Err(CryptoError::Cipher("ciphertext too short".to_string()));
        }
        let (nonce_bytes, sealed) = ciphertext.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| CryptoError::Cipher("invalid nonce".to_string()))?;

        let mut in_out = sealed.to_vec();
        let plaintext = self
            .key
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| CryptoError::Cipher("decryption failed".to_string()))?;
        Ok(plaintext.to_vec())
    }
}
