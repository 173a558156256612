//! Governance registry provider seam.
//!
//! The governance registry is a hierarchical path-to-bytes store
//! partitioned per tenant. A registry handle is only handed out under a
//! matching active tenant scope and must not be retained past it.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::RegistryError;
use crate::scope::TenantScope;

/// A tenant-bound hierarchical key-to-bytes store.
pub trait Registry: Send + Sync {
    /// Reads the resource at a path.
    ///
    /// ## Errors
    ///
    /// Returns `RegistryError::ResourceNotFound` if nothing is stored at
    /// the path, or `RegistryError::Backend` on storage failure.
    fn get(&self, path: &str) -> Result<Vec<u8>, RegistryError>;

    /// Stores a resource at a path, replacing any previous content.
    ///
    /// ## Errors
    ///
    /// Returns `RegistryError::Backend` on storage failure.
    fn put(&self, path: &str, content: Vec<u8>) -> Result<(), RegistryError>;
}

/// Hands out per-tenant governance registries.
pub trait RegistryService: Send + Sync {
    /// Returns the governance registry for a tenant.
    ///
    /// Callers must hold an active tenant scope for `tenant_id`; the
    /// returned handle is only valid for the duration of that scope.
    ///
    /// ## Errors
    ///
    /// Returns `RegistryError::NoActiveScope` or
    /// `RegistryError::TenantMismatch` if the calling thread is not
    /// scoped to the requested tenant.
    fn governance_registry(&self, tenant_id: i32) -> Result<Arc<dyn Registry>, RegistryError>;
}

#[derive(Debug, Default)]
struct InMemoryRegistry {
    resources: DashMap<String, Vec<u8>>,
}

impl Registry for InMemoryRegistry {
    fn get(&self, path: &str) -> Result<Vec<u8>, RegistryError> {
        self.resources
            .get(path)
            .map(|content| content.clone())
            .ok_or_else(|| RegistryError::ResourceNotFound(path.to_string()))
    }

    fn put(&self, path: &str, content: Vec<u8>) -> Result<(), RegistryError> {
        self.resources.insert(path.to_string(), content);
        Ok(())
    }
}

/// In-process registry service holding one store per tenant.
#[derive(Debug, Default)]
pub struct InMemoryRegistryService {
    tenants: DashMap<i32, Arc<InMemoryRegistry>>,
}

impl InMemoryRegistryService {
    /// Creates an empty registry service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a resource into a tenant's governance registry.
    ///
    /// Bypasses the scope check; intended for startup and tests.
    pub fn seed(&self, tenant_id: i32, path: &str, content: impl Into<Vec<u8>>) {
        self.tenants
            .entry(tenant_id)
            .or_default()
            .resources
            .insert(path.to_string(), content.into());
    }
}

impl RegistryService for InMemoryRegistryService {
    fn governance_registry(&self, tenant_id: i32) -> Result<Arc<dyn Registry>, RegistryError> {
        let Some(binding) = TenantScope::current() else {
            tracing::warn!(tenant_id, "governance registry requested without a tenant scope");
            return Err(RegistryError::NoActiveScope);
        };
        if binding.tenant_id != tenant_id {
            return Err(RegistryError::TenantMismatch {
                active: binding.tenant_id,
                requested: tenant_id,
            });
        }
        let store = self.tenants.entry(tenant_id).or_default().clone();
        Ok(store)
    }
}
