//! # idp-crypto
//!
//! Secret protection for the identity platform.
//!
//! Provides the process-wide cipher service seam and the crypto gateway
//! that converts short secrets (such as TOTP seeds) to and from a
//! transport-safe text form. All primitives come from `aws-lc-rs`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cipher;
pub mod error;
pub mod gateway;

pub use cipher::{AesGcmCipher, CipherService};
pub use error::{CryptoError, CryptoResult};
pub use gateway::CryptoGateway;
