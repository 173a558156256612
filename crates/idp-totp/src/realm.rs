//! Tenant-aware user realm lookup for verification time.

use std::sync::Arc;

use idp_tenant::{RealmService, TenantLookup, UserRealm, SUPER_TENANT_DOMAIN};

use crate::error::AuthenticationFailed;

/// Extracts the tenant domain from a fully-qualified username.
///
/// Standard multi-tenancy parsing: the part after the last `@`,
/// lowercased; a username without a tenant qualifier belongs to the
/// super tenant.
#[must_use]
pub fn tenant_domain_of(username: &str) -> String {
    match username.rsplit_once('@') {
        Some((_, domain)) if !domain.is_empty() => domain.to_ascii_lowercase(),
        _ => SUPER_TENANT_DOMAIN.to_string(),
    }
}

/// Returns the tenant-scoped user realm for a username.
///
/// A `None` username yields `Ok(None)`.
///
/// ## Errors
///
/// Returns [`AuthenticationFailed`] carrying the username when the
/// tenant cannot be resolved or the directory backend fails.
pub fn user_realm(
    tenants: &dyn TenantLookup,
    realms: &dyn RealmService,
    username: Option<&str>,
) -> Result<Option<Arc<UserRealm>>, AuthenticationFailed> {
    let Some(username) = username else {
        return Ok(None);
    };
    let tenant_domain = tenant_domain_of(username);
    let tenant_id = tenants.tenant_id(&tenant_domain).map_err(|error| {
        AuthenticationFailed::with_source(
            format!("Cannot find the user realm for the username: {username}"),
            error,
        )
    })?;
    realms.tenant_user_realm(tenant_id).map_err(|error| {
        AuthenticationFailed::with_source(
            format!("Cannot find the user realm for the username: {username}"),
            error,
        )
    })
}
