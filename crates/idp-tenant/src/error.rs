//! Error types for tenant scoping and tenant-partitioned providers.

use thiserror::Error;

/// Errors from the tenant scope guard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    /// A tenant scope is already active on this thread.
    ///
    /// Nested scopes are unsupported; finish the active scope first.
    #[error("a tenant scope is already active on this thread (tenant id {active})")]
    NestedScope {
        /// Tenant id of the scope that is already active.
        active: i32,
    },
}

/// Errors from tenant-domain to tenant-id resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TenantLookupError {
    /// No tenant is registered under the given domain.
    #[error("unknown tenant domain: {0}")]
    UnknownTenant(String),
}

/// Errors from the governance registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No resource exists at the requested path.
    #[error("registry resource not found: {0}")]
    ResourceNotFound(String),

    /// The registry was requested without an active tenant scope.
    #[error("no tenant scope is active on this thread")]
    NoActiveScope,

    /// The active tenant scope does not match the requested tenant.
    #[error("active tenant scope is for tenant {active}, requested {requested}")]
    TenantMismatch {
        /// Tenant id bound to the active scope.
        active: i32,
        /// Tenant id the registry was requested for.
        requested: i32,
    },

    /// The storage backend failed.
    #[error("registry backend error: {0}")]
    Backend(String),
}

/// Errors from the user store behind a realm.
#[derive(Debug, Error)]
pub enum UserStoreError {
    /// The user store rejected the operation.
    #[error("user store error: {0}")]
    Store(String),
}
