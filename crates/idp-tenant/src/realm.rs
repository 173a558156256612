//! Per-tenant user realm provider seam.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::UserStoreError;

/// An opaque tenant-scoped directory handle.
///
/// The realm exposes the tenant's user directory to the verification
/// path; the user profile store behind it is an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRealm {
    tenant_id: i32,
}

impl UserRealm {
    /// Creates a realm handle for a tenant.
    #[must_use]
    pub const fn new(tenant_id: i32) -> Self {
        Self { tenant_id }
    }

    /// Returns the tenant this realm belongs to.
    #[must_use]
    pub const fn tenant_id(&self) -> i32 {
        self.tenant_id
    }
}

/// Hands out per-tenant user realms.
pub trait RealmService: Send + Sync {
    /// Returns the user realm for a tenant, if one is provisioned.
    ///
    /// ## Errors
    ///
    /// Returns `UserStoreError::Store` when the directory backend fails.
    fn tenant_user_realm(&self, tenant_id: i32) -> Result<Option<Arc<UserRealm>>, UserStoreError>;
}

/// In-process realm service backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryRealmService {
    realms: RwLock<HashMap<i32, Arc<UserRealm>>>,
}

impl InMemoryRealmService {
    /// Creates an empty realm service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provisions a realm for a tenant.
    pub fn provision(&self, tenant_id: i32) {
        self.realms
            .write()
            .insert(tenant_id, Arc::new(UserRealm::new(tenant_id)));
    }
}

impl RealmService for InMemoryRealmService {
    fn tenant_user_realm(&self, tenant_id: i32) -> Result<Option<Arc<UserRealm>>, UserStoreError> {
        Ok(self.realms.read().get(&tenant_id).cloned())
    }
}
