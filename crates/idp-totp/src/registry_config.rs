//! Per-tenant configuration reads from the governance registry.
//!
//! The registry holds one XML document per tenant at
//! `totp/application-authentication.xml`. The reader resolves the
//! tenant, enters a tenant scope for the duration of the read, extracts
//! the `encodingMethod` parameter and reports the outcome as an explicit
//! tagged value instead of driving control flow through errors:
//! registry-layer failures (including an absent resource) are
//! recoverable and map to [`RegistryValue::Unavailable`], while XML
//! failures are fatal.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::NsReader;

use idp_tenant::{RegistryService, TenantLookup, TenantScope};

use crate::constants::{APPLICATION_AUTHENTICATION_XML, AUTHENTICATOR_NAME, ENCODING_METHOD,
    GET_PROPERTY_FROM_IDENTITY_CONFIG};
use crate::context::AuthenticationContext;
use crate::error::ConfigReadError;

/// Outcome of a registry configuration read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryValue {
    /// The parameter was present; text content is verbatim (no trim).
    Found(String),
    /// The document was read but carries no matching parameter.
    Missing,
    /// The registry layer failed; callers fall back to the helper.
    Unavailable,
}

/// Reads the `encodingMethod` parameter for a tenant, applying the hint
/// writeback at the boundary.
///
/// Returns `Ok(None)` when the parameter is missing or the registry is
/// unavailable; in the unavailable case the
/// `getPropertyFromIdentityConfig` hint is set on the context, if one
/// was supplied.
///
/// ## Errors
///
/// Returns [`ConfigReadError`] for malformed XML and for tenant
/// resolution or scoping failures.
pub fn encoding_method_from_registry(
    tenants: &dyn TenantLookup,
    registries: &dyn RegistryService,
    tenant_domain: &str,
    context: Option<&mut AuthenticationContext>,
) -> Result<Option<String>, ConfigReadError> {
    match read_encoding_method(tenants, registries, tenant_domain)? {
        RegistryValue::Found(value) => Ok(Some(value)),
        RegistryValue::Missing => Ok(None),
        RegistryValue::Unavailable => {
            if let Some(context) = context {
                context.set_property(
                    GET_PROPERTY_FROM_IDENTITY_CONFIG,
                    GET_PROPERTY_FROM_IDENTITY_CONFIG,
                );
            }
            Ok(None)
        }
    }
}

/// Reads the `encodingMethod` parameter for a tenant.
///
/// The whole read runs under a tenant scope which is released on every
/// exit path.
///
/// ## Errors
///
/// Returns [`ConfigReadError`] for malformed XML and for tenant
/// resolution or scoping failures. Registry-layer failures are not
/// errors; they yield [`RegistryValue::Unavailable`].
pub fn read_encoding_method(
    tenants: &dyn TenantLookup,
    registries: &dyn RegistryService,
    tenant_domain: &str,
) -> Result<RegistryValue, ConfigReadError> {
    let tenant_id = tenants.tenant_id(tenant_domain)?;
    let _scope = TenantScope::enter(tenant_id, tenant_domain)?;

    let registry = match registries.governance_registry(tenant_id) {
        Ok(registry) => registry,
        Err(error) => {
            tracing::warn!(tenant_domain, %error, "governance registry unavailable");
            return Ok(RegistryValue::Unavailable);
        }
    };

    let path = format!("{AUTHENTICATOR_NAME}/{APPLICATION_AUTHENTICATION_XML}");
    let content = match registry.get(&path) {
        Ok(content) => content,
        Err(error) => {
            tracing::warn!(tenant_domain, path, %error, "registry resource read failed");
            return Ok(RegistryValue::Unavailable);
        }
    };

    extract_encoding_method(&content)
}

/// Extracts the `encodingMethod` parameter from the configuration XML.
///
/// The first `AuthenticatorConfig` element whose `name` attribute equals
/// the authenticator name wins, and within it the first child element
/// whose `name` attribute equals `encodingMethod`. A child without a
/// `name` attribute never matches. Element prefixes are ignored
/// (namespace-aware parse); external entities are never expanded.
fn extract_encoding_method(content: &[u8]) -> Result<RegistryValue, ConfigReadError> {
    let mut reader = NsReader::from_reader(content);
    let mut buf = Vec::new();

    // Position inside the first matching AuthenticatorConfig element.
    let mut in_config = false;
    let mut child_depth = 0usize;
    let mut capture: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => {
                if !in_config {
                    if is_named(&element, b"AuthenticatorConfig", AUTHENTICATOR_NAME)? {
                        in_config = true;
                        child_depth = 0;
                    }
                } else {
                    child_depth += 1;
                    if child_depth == 1
                        && capture.is_none()
                        && name_attribute(&element)?.as_deref() == Some(ENCODING_METHOD)
                    {
                        // Text events until the matching End accumulate here.
                        capture = Some(String::new());
                    }
                }
            }
            Event::Empty(element) => {
                if in_config
                    && child_depth == 0
                    && capture.is_none()
                    && name_attribute(&element)?.as_deref() == Some(ENCODING_METHOD)
                {
                    return Ok(RegistryValue::Found(String::new()));
                }
                if !in_config && is_named(&element, b"AuthenticatorConfig", AUTHENTICATOR_NAME)? {
                    return Ok(RegistryValue::Missing);
                }
            }
            Event::Text(text) => {
                if let Some(value) = capture.as_mut() {
                    value.push_str(&text.unescape()?);
                }
            }
            Event::CData(cdata) => {
                if let Some(value) = capture.as_mut() {
                    value.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::End(_) => {
                if in_config {
                    if child_depth == 0 {
                        // End of the first matching AuthenticatorConfig.
                        return Ok(RegistryValue::Missing);
                    }
                    if child_depth == 1 {
                        if let Some(value) = capture.take() {
                            return Ok(RegistryValue::Found(value));
                        }
                    }
                    child_depth -= 1;
                }
            }
            Event::Eof => return Ok(RegistryValue::Missing),
            _ => {}
        }
        buf.clear();
    }
}

fn is_named(
    element: &BytesStart<'_>,
    local: &[u8],
    name_value: &str,
) -> Result<bool, ConfigReadError> {
    if element.local_name().as_ref() != local {
        return Ok(false);
    }
    Ok(name_attribute(element)?.as_deref() == Some(name_value))
}

fn name_attribute(element: &BytesStart<'_>) -> Result<Option<String>, ConfigReadError> {
    let attribute = element
        .try_get_attribute("name")
        .map_err(quick_xml::Error::from)?;
    Ok(attribute.map(|attr| String::from_utf8_lossy(&attr.value).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<AuthenticatorConfigs>
  <AuthenticatorConfig name="basic">
    <Parameter name="encodingMethod">ShouldNotWin</Parameter>
  </AuthenticatorConfig>
  <AuthenticatorConfig name="totp">
    <Parameter name="usecase">local</Parameter>
    <Parameter name="encodingMethod">Base32</Parameter>
    <Parameter name="encodingMethod">Base64</Parameter>
  </AuthenticatorConfig>
</AuthenticatorConfigs>"#;

    #[test]
    fn first_matching_parameter_wins() {
        let value = extract_encoding_method(DOC.as_bytes()).unwrap();
        assert_eq!(value, RegistryValue::Found("Base32".to_string()));
    }

    #[test]
    fn first_matching_config_wins() {
        let doc = r#"<AuthenticatorConfigs>
  <AuthenticatorConfig name="totp"><Parameter name="other">x</Parameter></AuthenticatorConfig>
  <AuthenticatorConfig name="totp"><Parameter name="encodingMethod">Base32</Parameter></AuthenticatorConfig>
</AuthenticatorConfigs>"#;
        // The first totp block has no encodingMethod; later blocks are
        // never consulted.
        let value = extract_encoding_method(doc.as_bytes()).unwrap();
        assert_eq!(value, RegistryValue::Missing);
    }

    #[test]
    fn whitespace_is_preserved_verbatim() {
        let doc = r#"<AuthenticatorConfigs><AuthenticatorConfig name="totp">
  <Parameter name="encodingMethod"> Base32 </Parameter>
</AuthenticatorConfig></AuthenticatorConfigs>"#;
        let value = extract_encoding_method(doc.as_bytes()).unwrap();
        assert_eq!(value, RegistryValue::Found(" Base32 ".to_string()));
    }

    #[test]
    fn child_without_name_attribute_never_matches() {
        let doc = r#"<AuthenticatorConfigs><AuthenticatorConfig name="totp">
  <Parameter>Base32</Parameter>
</AuthenticatorConfig></AuthenticatorConfigs>"#;
        let value = extract_encoding_method(doc.as_bytes()).unwrap();
        assert_eq!(value, RegistryValue::Missing);
    }

    #[test]
    fn prefixed_elements_match_by_local_name() {
        let doc = r#"<c:AuthenticatorConfigs xmlns:c="http://example.com/config">
  <c:AuthenticatorConfig name="totp">
    <c:Parameter name="encodingMethod">Base32</c:Parameter>
  </c:AuthenticatorConfig>
</c:AuthenticatorConfigs>"#;
        let value = extract_encoding_method(doc.as_bytes()).unwrap();
        assert_eq!(value, RegistryValue::Found("Base32".to_string()));
    }

    #[test]
    fn empty_parameter_element_is_found_empty() {
        let doc = r#"<AuthenticatorConfigs><AuthenticatorConfig name="totp">
  <Parameter name="encodingMethod"/>
</AuthenticatorConfig></AuthenticatorConfigs>"#;
        let value = extract_encoding_method(doc.as_bytes()).unwrap();
        assert_eq!(value, RegistryValue::Found(String::new()));
    }

    #[test]
    fn absent_authenticator_block_is_missing() {
        let doc = r#"<AuthenticatorConfigs><AuthenticatorConfig name="basic">
  <Parameter name="encodingMethod">Base32</Parameter>
</AuthenticatorConfig></AuthenticatorConfigs>"#;
        let value = extract_encoding_method(doc.as_bytes()).unwrap();
        assert_eq!(value, RegistryValue::Missing);
    }

    #[test]
    fn malformed_xml_is_fatal() {
        let mismatched = r#"<a><b></a></b>"#;
        assert!(matches!(
            extract_encoding_method(mismatched.as_bytes()),
            Err(ConfigReadError::Xml(_))
        ));
    }

    #[test]
    fn escaped_text_is_unescaped() {
        let doc = r#"<AuthenticatorConfigs><AuthenticatorConfig name="totp">
  <Parameter name="encodingMethod">Base&#51;2</Parameter>
</AuthenticatorConfig></AuthenticatorConfigs>"#;
        let value = extract_encoding_method(doc.as_bytes()).unwrap();
        assert_eq!(value, RegistryValue::Found("Base32".to_string()));
    }
}
