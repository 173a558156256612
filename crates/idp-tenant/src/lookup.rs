//! Tenant-domain to tenant-id resolution.

use dashmap::DashMap;

use crate::error::TenantLookupError;
use crate::{SUPER_TENANT_DOMAIN, SUPER_TENANT_ID};

/// Resolves a tenant domain to its numeric tenant id.
///
/// Implementations must be thread-safe and support concurrent lookups.
pub trait TenantLookup: Send + Sync {
    /// Returns the tenant id for a domain.
    ///
    /// ## Errors
    ///
    /// Returns `TenantLookupError::UnknownTenant` if the domain is not
    /// registered.
    fn tenant_id(&self, tenant_domain: &str) -> Result<i32, TenantLookupError>;
}

/// Map-backed tenant lookup.
///
/// The super tenant is always resolvable.
#[derive(Debug, Default)]
pub struct StaticTenantLookup {
    tenants: DashMap<String, i32>,
}

impl StaticTenantLookup {
    /// Creates a lookup that only knows the super tenant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tenant domain.
    pub fn register(&self, tenant_domain: impl Into<String>, tenant_id: i32) {
        self.tenants.insert(tenant_domain.into(), tenant_id);
    }
}

impl TenantLookup for StaticTenantLookup {
    fn tenant_id(&self, tenant_domain: &str) -> Result<i32, TenantLookupError> {
        if tenant_domain == SUPER_TENANT_DOMAIN {
            return Ok(SUPER_TENANT_ID);
        }
        self.tenants
            .get(tenant_domain)
            .map(|id| *id)
            .ok_or_else(|| TenantLookupError::UnknownTenant(tenant_domain.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_tenant_is_builtin() {
        let lookup = StaticTenantLookup::new();
        assert_eq!(lookup.tenant_id(SUPER_TENANT_DOMAIN), Ok(SUPER_TENANT_ID));
    }

    #[test]
    fn registered_tenants_resolve() {
        let lookup = StaticTenantLookup::new();
        lookup.register("acme.com", 17);
        assert_eq!(lookup.tenant_id("acme.com"), Ok(17));
    }

    #[test]
    fn unknown_tenant_is_an_error() {
        let lookup = StaticTenantLookup::new();
        assert_eq!(
            lookup.tenant_id("ghost.org"),
            Err(TenantLookupError::UnknownTenant("ghost.org".to_string()))
        );
    }
}
