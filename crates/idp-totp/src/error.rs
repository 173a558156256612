//! Error types for the TOTP configuration layer.

use idp_tenant::{ScopeError, TenantLookupError};
use thiserror::Error;

/// Fatal failures while reading the per-tenant configuration resource.
///
/// Registry-layer failures are deliberately not represented here; they
/// are recoverable and surface as an empty read plus the hint property
/// (see [`crate::registry_config`]).
#[derive(Debug, Error)]
pub enum ConfigReadError {
    /// The registry content could not be parsed as XML.
    #[error("error while parsing the content as XML")]
    Xml(#[from] quick_xml::Error),

    /// The tenant domain could not be resolved to a tenant id.
    #[error("tenant resolution failed")]
    TenantLookup(#[from] TenantLookupError),

    /// A tenant scope could not be entered.
    #[error("tenant scope error")]
    Scope(#[from] ScopeError),
}

/// User-visible failure at the public API boundary.
///
/// Carries a human-readable message and, where available, the cause.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AuthenticationFailed {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AuthenticationFailed {
    /// Creates a failure with a message and no cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a failure carrying its cause.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failures while resolving a typed parameter value.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// A required parameter is absent from every consulted source.
    #[error("required parameter is not set: {0}")]
    MissingParameter(String),

    /// A parameter value could not be parsed as an integer.
    #[error("parameter {parameter} is not a valid integer")]
    InvalidNumber {
        /// Name of the malformed parameter.
        parameter: String,
        /// Underlying parse failure.
        #[source]
        source: std::num::ParseIntError,
    },
}
