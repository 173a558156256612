//! # idp-tenant
//!
//! Multi-tenant isolation primitives for the identity platform.
//!
//! Every read against tenant-partitioned storage happens under an
//! explicit tenant scope: a thread-bound `(tenant id, tenant domain)`
//! binding acquired through an RAII guard and released on every exit
//! path. This crate also defines the provider seams for tenant-id
//! lookup, the hierarchical governance registry and the per-tenant user
//! realm, together with in-memory providers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod lookup;
pub mod realm;
pub mod registry;
pub mod scope;

pub use error::{RegistryError, ScopeError, TenantLookupError, UserStoreError};
pub use lookup::{StaticTenantLookup, TenantLookup};
pub use realm::{InMemoryRealmService, RealmService, UserRealm};
pub use registry::{InMemoryRegistryService, Registry, RegistryService};
pub use scope::{TenantBinding, TenantScope};

/// Domain of the distinguished super tenant.
pub const SUPER_TENANT_DOMAIN: &str = "carbon.super";

/// Tenant id of the distinguished super tenant.
pub const SUPER_TENANT_ID: i32 = -1234;
