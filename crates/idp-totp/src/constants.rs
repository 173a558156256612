//! Well-known names used by the TOTP authenticator.

/// Name of the authenticator, used as registry path segment, parameter
/// map key and redirect query value.
pub const AUTHENTICATOR_NAME: &str = "totp";

/// File name of the per-tenant configuration resource in the governance
/// registry.
pub const APPLICATION_AUTHENTICATION_XML: &str = "application-authentication.xml";

/// Relative path of the enrollment prompt page.
pub const ENABLE_TOTP_REQUEST_PAGE: &str = "authenticationendpoint/totp_enable.do";

/// Parameter: textual representation of the shared secret.
pub const ENCODING_METHOD: &str = "encodingMethod";

/// Encoding method literal for base32 secrets.
pub const BASE32: &str = "Base32";

/// Encoding method literal for base64 secrets (the normalization default).
pub const BASE64: &str = "Base64";

/// Parameter: TOTP period in seconds.
pub const TIME_STEP_SIZE: &str = "TimeStepSize";

/// Parameter: tolerated ± time-steps during verification.
pub const WINDOW_SIZE: &str = "WindowSize";

/// Parameter: whether TOTP participates in the authentication flow.
pub const ENABLE_TOTP_IN_AUTHENTICATION_FLOW: &str = "EnableTOTPInAuthenticationFlow";

/// Context hint: prefer the tenant-resolved helper over context values.
///
/// Set (to its own name) when a registry read fails with a non-parse
/// error; its presence is the flag, the value carries no meaning.
pub const GET_PROPERTY_FROM_IDENTITY_CONFIG: &str = "getPropertyFromIdentityConfig";

/// Context hint: numeric/boolean parameters come from the helper rather
/// than the context.
pub const GET_PROPERTY_FROM_REGISTRY: &str = "getPropertyFromRegistry";

/// Context property naming the authenticator whose helper parameters
/// apply to the current attempt.
pub const AUTHENTICATION: &str = "authentication";

/// Query parameter carrying the session identifier in redirect URLs.
pub const SESSION_DATA_KEY: &str = "sessionDataKey";
