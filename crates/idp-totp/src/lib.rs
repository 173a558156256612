//! # idp-totp
//!
//! Tenant-scoped configuration utilities for the TOTP second-factor
//! authenticator.
//!
//! The resolver reconciles three configuration sources for each
//! authentication attempt: the process-wide static file (authoritative
//! for the super tenant), the per-tenant XML document in the governance
//! registry, and the properties of the current authentication context.
//! Every registry read happens under an explicit tenant scope that is
//! released on all exit paths.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod constants;
pub mod context;
pub mod error;
pub mod realm;
pub mod redirect;
pub mod registry_config;
pub mod resolver;

pub use context::AuthenticationContext;
pub use error::{AuthenticationFailed, ConfigReadError, ResolverError};
pub use registry_config::{encoding_method_from_registry, RegistryValue};
pub use resolver::{EncodingMethod, IdentityHelper, StaticIdentityHelper, TotpConfigResolver};
