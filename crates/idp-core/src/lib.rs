//! # idp-core
//!
//! Shared kernel for the identity platform utilities.
//!
//! This crate carries the process-wide file-based configuration snapshot
//! (authenticator parameter maps plus the server base URL) and the
//! platform-level error surface.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;

pub use config::{IdentityConfig, ServerConfig};
pub use error::{Error, Result};
