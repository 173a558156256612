//! Per-tenant, per-session resolution of TOTP parameters.
//!
//! Precedence: the super tenant is backed by the static file
//! configuration; for every other tenant explicit context values
//! dominate unless the context carries a directive hint telling the
//! resolver to consult the tenant-resolved helper.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;

use idp_core::IdentityConfig;
use idp_tenant::{RegistryService, TenantLookup, SUPER_TENANT_DOMAIN};

use crate::constants::{AUTHENTICATION, AUTHENTICATOR_NAME, BASE32, BASE64,
    ENABLE_TOTP_IN_AUTHENTICATION_FLOW, ENCODING_METHOD, GET_PROPERTY_FROM_IDENTITY_CONFIG,
    GET_PROPERTY_FROM_REGISTRY, TIME_STEP_SIZE, WINDOW_SIZE};
use crate::context::AuthenticationContext;
use crate::error::{AuthenticationFailed, ResolverError};
use crate::registry_config::encoding_method_from_registry;

/// Textual representation of the shared TOTP secret.
///
/// Normalization guarantees the resolved method is always one of the two
/// variants: exactly the literal `Base32` maps to `Base32`, anything
/// else (including an absent value) maps to `Base64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMethod {
    /// RFC 4648 base32 secret encoding.
    Base32,
    /// RFC 4648 base64 secret encoding (the default).
    Base64,
}

impl EncodingMethod {
    /// Normalizes a raw configuration value.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        if raw == Some(BASE32) {
            Self::Base32
        } else {
            Self::Base64
        }
    }

    /// Returns the configuration literal for this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base32 => BASE32,
            Self::Base64 => BASE64,
        }
    }
}

impl std::fmt::Display for EncodingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tenant-resolved authenticator parameter helper.
///
/// An external collaborator that materializes the parameter map of an
/// authenticator for the current tenant. Implementations must be
/// thread-safe.
pub trait IdentityHelper: Send + Sync {
    /// Returns the parameter map for an authenticator; empty when the
    /// authenticator is unknown.
    fn authenticator_params(&self, authenticator_name: &str) -> HashMap<String, String>;
}

/// Map-backed identity helper.
#[derive(Debug, Default)]
pub struct StaticIdentityHelper {
    params: DashMap<String, HashMap<String, String>>,
}

impl StaticIdentityHelper {
    /// Creates an empty helper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parameter map for an authenticator.
    pub fn set(&self, authenticator_name: impl Into<String>, params: HashMap<String, String>) {
        self.params.insert(authenticator_name.into(), params);
    }
}

impl IdentityHelper for StaticIdentityHelper {
    fn authenticator_params(&self, authenticator_name: &str) -> HashMap<String, String> {
        self.params
            .get(authenticator_name)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }
}

/// Resolves TOTP parameters across the file configuration, the
/// governance registry and the session context.
///
/// Resolution is pure with respect to its inputs; the only side effect
/// anywhere in the resolver is the single hint writeback performed by
/// [`encoding_method_from_registry`] on registry failure.
#[derive(Clone)]
pub struct TotpConfigResolver {
    config: Arc<IdentityConfig>,
    tenants: Arc<dyn TenantLookup>,
    registries: Arc<dyn RegistryService>,
    identity_helper: Arc<dyn IdentityHelper>,
}

impl std::fmt::Debug for TotpConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TotpConfigResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TotpConfigResolver {
    /// Creates a resolver over its collaborators.
    #[must_use]
    pub fn new(
        config: Arc<IdentityConfig>,
        tenants: Arc<dyn TenantLookup>,
        registries: Arc<dyn RegistryService>,
        identity_helper: Arc<dyn IdentityHelper>,
    ) -> Self {
        Self {
            config,
            tenants,
            registries,
            identity_helper,
        }
    }

    /// Returns the file configuration snapshot this resolver reads.
    #[must_use]
    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    /// Resolves the secret encoding method for an active session.
    ///
    /// Super tenant: the static file parameter. Other tenants: the
    /// context's `encodingMethod` property, unless the
    /// `getPropertyFromIdentityConfig` hint is set, in which case the
    /// tenant-resolved helper is consulted instead.
    #[must_use]
    pub fn encoding_method(
        &self,
        tenant_domain: &str,
        context: &AuthenticationContext,
    ) -> EncodingMethod {
        let raw = if tenant_domain == SUPER_TENANT_DOMAIN {
            self.file_param(ENCODING_METHOD)
        } else if context.property(GET_PROPERTY_FROM_IDENTITY_CONFIG).is_none() {
            context.property(ENCODING_METHOD).map(str::to_owned)
        } else {
            self.helper_param(AUTHENTICATOR_NAME, ENCODING_METHOD)
        };
        EncodingMethod::normalize(raw.as_deref())
    }

    /// Resolves the secret encoding method outside an active session.
    ///
    /// Super tenant: the static file parameter. Other tenants: the
    /// governance registry, falling back to the tenant-resolved helper
    /// when the registry carries no value.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthenticationFailed`] when the registry content cannot
    /// be read as XML or the tenant cannot be resolved.
    pub fn encoding_method_for_tenant(
        &self,
        tenant_domain: &str,
    ) -> Result<EncodingMethod, AuthenticationFailed> {
        let raw = if tenant_domain == SUPER_TENANT_DOMAIN {
            self.file_param(ENCODING_METHOD)
        } else {
            let from_registry = encoding_method_from_registry(
                self.tenants.as_ref(),
                self.registries.as_ref(),
                tenant_domain,
                None,
            )
            .map_err(|error| {
                AuthenticationFailed::with_source(
                    "Cannot find the property value for encodingMethod",
                    error,
                )
            })?;
            match from_registry {
                Some(value) if !value.is_empty() => Some(value),
                _ => self.helper_param(AUTHENTICATOR_NAME, ENCODING_METHOD),
            }
        };
        Ok(EncodingMethod::normalize(raw.as_deref()))
    }

    /// Resolves the TOTP period in seconds.
    ///
    /// ## Errors
    ///
    /// Returns [`ResolverError`] when the value is absent or not an
    /// integer.
    pub fn time_step_size(&self, context: &AuthenticationContext) -> Result<i64, ResolverError> {
        tracing::debug!("reading the TimeStepSize value for the current tenant");
        self.numeric_param(context, TIME_STEP_SIZE)
    }

    /// Resolves the tolerated ± time-step window.
    ///
    /// ## Errors
    ///
    /// Returns [`ResolverError`] when the value is absent or not an
    /// integer.
    pub fn window_size(&self, context: &AuthenticationContext) -> Result<i64, ResolverError> {
        tracing::debug!("reading the WindowSize value for the current tenant");
        self.numeric_param(context, WINDOW_SIZE)
    }

    /// Resolves whether TOTP participates in the authentication flow.
    ///
    /// The boolean parse is permissive: exactly the literal `true`
    /// (case-insensitive) is true, anything else — an absent value
    /// included — is false.
    ///
    /// ## Errors
    ///
    /// Returns [`ResolverError::MissingParameter`] only when the
    /// `authentication` property naming the helper is itself absent.
    pub fn totp_enabled_in_flow(
        &self,
        context: &AuthenticationContext,
    ) -> Result<bool, ResolverError> {
        tracing::debug!("reading the EnableTOTPInAuthenticationFlow value for the current tenant");
        match self.session_param(context, ENABLE_TOTP_IN_AUTHENTICATION_FLOW) {
            Ok(value) => Ok(value.eq_ignore_ascii_case("true")),
            Err(ResolverError::MissingParameter(name))
                if name == ENABLE_TOTP_IN_AUTHENTICATION_FLOW =>
            {
                Ok(false)
            }
            Err(error) => Err(error),
        }
    }

    /// Looks a parameter up for the current session.
    ///
    /// Helper-backed when the `getPropertyFromRegistry` hint is set or
    /// the session belongs to the super tenant; context-backed
    /// otherwise.
    fn session_param(
        &self,
        context: &AuthenticationContext,
        key: &str,
    ) -> Result<String, ResolverError> {
        let helper_backed = context.property(GET_PROPERTY_FROM_REGISTRY).is_some()
            || context.tenant_domain() == SUPER_TENANT_DOMAIN;
        if helper_backed {
            let authenticator = context
                .property(AUTHENTICATION)
                .ok_or_else(|| ResolverError::MissingParameter(AUTHENTICATION.to_string()))?;
            self.helper_param(authenticator, key)
                .ok_or_else(|| ResolverError::MissingParameter(key.to_string()))
        } else {
            context
                .property(key)
                .map(str::to_owned)
                .ok_or_else(|| ResolverError::MissingParameter(key.to_string()))
        }
    }

    fn numeric_param(
        &self,
        context: &AuthenticationContext,
        key: &str,
    ) -> Result<i64, ResolverError> {
        let raw = self.session_param(context, key)?;
        raw.parse::<i64>().map_err(|source| ResolverError::InvalidNumber {
            parameter: key.to_string(),
            source,
        })
    }

    fn file_param(&self, key: &str) -> Option<String> {
        self.config
            .authenticator_params(AUTHENTICATOR_NAME)
            .and_then(|params| params.get(key))
            .cloned()
    }

    fn helper_param(&self, authenticator_name: &str, key: &str) -> Option<String> {
        self.identity_helper
            .authenticator_params(authenticator_name)
            .get(key)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idp_tenant::{InMemoryRegistryService, StaticTenantLookup};

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn resolver_with(
        file_params: HashMap<String, String>,
        helper_params: HashMap<String, String>,
    ) -> TotpConfigResolver {
        let config = IdentityConfig::new().with_authenticator(AUTHENTICATOR_NAME, file_params);
        let helper = StaticIdentityHelper::new();
        helper.set(AUTHENTICATOR_NAME, helper_params);
        TotpConfigResolver::new(
            Arc::new(config),
            Arc::new(StaticTenantLookup::new()),
            Arc::new(InMemoryRegistryService::new()),
            Arc::new(helper),
        )
    }

    #[test]
    fn normalize_is_exact_literal() {
        assert_eq!(EncodingMethod::normalize(Some("Base32")), EncodingMethod::Base32);
        assert_eq!(EncodingMethod::normalize(Some("base32")), EncodingMethod::Base64);
        assert_eq!(EncodingMethod::normalize(Some(" Base32 ")), EncodingMethod::Base64);
        assert_eq!(EncodingMethod::normalize(Some("Base64")), EncodingMethod::Base64);
        assert_eq!(EncodingMethod::normalize(None), EncodingMethod::Base64);
    }

    #[test]
    fn super_tenant_reads_the_file() {
        let resolver = resolver_with(params(&[(ENCODING_METHOD, "Base32")]), params(&[]));
        let context = AuthenticationContext::new(SUPER_TENANT_DOMAIN, "s1");
        assert_eq!(
            resolver.encoding_method(SUPER_TENANT_DOMAIN, &context),
            EncodingMethod::Base32
        );
    }

    #[test]
    fn tenant_without_hint_reads_the_context() {
        let resolver = resolver_with(params(&[]), params(&[(ENCODING_METHOD, "Base32")]));
        let context = AuthenticationContext::new("acme.com", "s1")
            .with_property(ENCODING_METHOD, "Base64");
        // Helper says Base32, but without the hint the context wins.
        assert_eq!(
            resolver.encoding_method("acme.com", &context),
            EncodingMethod::Base64
        );
    }

    #[test]
    fn tenant_with_hint_reads_the_helper() {
        let resolver = resolver_with(params(&[]), params(&[(ENCODING_METHOD, "Base32")]));
        let context = AuthenticationContext::new("acme.com", "s1")
            .with_property(ENCODING_METHOD, "Base64")
            .with_property(GET_PROPERTY_FROM_IDENTITY_CONFIG, GET_PROPERTY_FROM_IDENTITY_CONFIG);
        assert_eq!(
            resolver.encoding_method("acme.com", &context),
            EncodingMethod::Base32
        );
    }

    #[test]
    fn missing_everything_normalizes_to_base64() {
        let resolver = resolver_with(params(&[]), params(&[]));
        let context = AuthenticationContext::new("acme.com", "s1");
        assert_eq!(
            resolver.encoding_method("acme.com", &context),
            EncodingMethod::Base64
        );
    }

    #[test]
    fn time_step_prefers_context_for_plain_tenants() {
        let resolver = resolver_with(params(&[]), params(&[(TIME_STEP_SIZE, "60")]));
        let context = AuthenticationContext::new("acme.com", "s1")
            .with_property(TIME_STEP_SIZE, "30");
        assert_eq!(resolver.time_step_size(&context).unwrap(), 30);
    }

    #[test]
    fn time_step_uses_helper_for_super_tenant() {
        let resolver = resolver_with(params(&[]), params(&[(TIME_STEP_SIZE, "60")]));
        let context = AuthenticationContext::new(SUPER_TENANT_DOMAIN, "s1")
            .with_property(AUTHENTICATION, AUTHENTICATOR_NAME);
        assert_eq!(resolver.time_step_size(&context).unwrap(), 60);
    }

    #[test]
    fn time_step_uses_helper_when_registry_hint_is_set() {
        let resolver = resolver_with(params(&[]), params(&[(TIME_STEP_SIZE, "90")]));
        let context = AuthenticationContext::new("acme.com", "s1")
            .with_property(GET_PROPERTY_FROM_REGISTRY, GET_PROPERTY_FROM_REGISTRY)
            .with_property(AUTHENTICATION, AUTHENTICATOR_NAME)
            .with_property(TIME_STEP_SIZE, "30");
        assert_eq!(resolver.time_step_size(&context).unwrap(), 90);
    }

    #[test]
    fn malformed_number_surfaces_as_parse_error() {
        let resolver = resolver_with(params(&[]), params(&[]));
        let context = AuthenticationContext::new("acme.com", "s1")
            .with_property(WINDOW_SIZE, "three");
        assert!(matches!(
            resolver.window_size(&context),
            Err(ResolverError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn missing_number_surfaces_as_missing_parameter() {
        let resolver = resolver_with(params(&[]), params(&[]));
        let context = AuthenticationContext::new("acme.com", "s1");
        assert!(matches!(
            resolver.window_size(&context),
            Err(ResolverError::MissingParameter(name)) if name == WINDOW_SIZE
        ));
    }

    #[test]
    fn window_size_reads_context_for_plain_tenants() {
        let resolver = resolver_with(params(&[]), params(&[]));
        let context = AuthenticationContext::new("acme.com", "s1")
            .with_property(WINDOW_SIZE, "3");
        assert_eq!(resolver.window_size(&context).unwrap(), 3);
    }

    #[test]
    fn flow_flag_is_case_insensitive_true() {
        let resolver = resolver_with(params(&[]), params(&[]));
        for (value, expected) in [("true", true), ("TRUE", true), ("True", true),
            ("yes", false), ("1", false), ("false", false)] {
            let context = AuthenticationContext::new("acme.com", "s1")
                .with_property(ENABLE_TOTP_IN_AUTHENTICATION_FLOW, value);
            assert_eq!(resolver.totp_enabled_in_flow(&context).unwrap(), expected);
        }
    }

    #[test]
    fn absent_flow_flag_is_false() {
        let resolver = resolver_with(params(&[]), params(&[]));
        let context = AuthenticationContext::new("acme.com", "s1");
        assert_eq!(resolver.totp_enabled_in_flow(&context).unwrap(), false);
    }

    #[test]
    fn helper_backed_paths_require_the_authentication_property() {
        let resolver = resolver_with(params(&[]), params(&[(TIME_STEP_SIZE, "60")]));
        let context = AuthenticationContext::new(SUPER_TENANT_DOMAIN, "s1");
        assert!(matches!(
            resolver.time_step_size(&context),
            Err(ResolverError::MissingParameter(name)) if name == AUTHENTICATION
        ));
    }
}
