//! Authentication context for a single attempt.

use std::collections::HashMap;

/// Session context bound to one authentication attempt.
///
/// The context is owned by the calling framework; the resolver reads its
/// properties and writes back at most one advisory hint
/// ([`crate::constants::GET_PROPERTY_FROM_IDENTITY_CONFIG`]) when a
/// registry read fails. Recognized property names are listed in
/// [`crate::constants`].
#[derive(Debug, Clone)]
pub struct AuthenticationContext {
    tenant_domain: String,
    context_identifier: String,
    properties: HashMap<String, String>,
}

impl AuthenticationContext {
    /// Creates a context for a tenant and session identifier.
    #[must_use]
    pub fn new(tenant_domain: impl Into<String>, context_identifier: impl Into<String>) -> Self {
        Self {
            tenant_domain: tenant_domain.into(),
            context_identifier: context_identifier.into(),
            properties: HashMap::new(),
        }
    }

    /// Adds a property, builder style.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Returns the tenant domain this attempt is bound to.
    #[must_use]
    pub fn tenant_domain(&self) -> &str {
        &self.tenant_domain
    }

    /// Returns the session identifier (the `sessionDataKey`).
    #[must_use]
    pub fn context_identifier(&self) -> &str {
        &self.context_identifier
    }

    /// Returns a property value, if set.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Sets a property value.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Returns the number of properties currently set.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}
