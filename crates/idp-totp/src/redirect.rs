//! Redirect to the TOTP enrollment prompt page.

use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use url::Url;

use idp_core::ServerConfig;

use crate::constants::{AUTHENTICATOR_NAME, ENABLE_TOTP_REQUEST_PAGE, SESSION_DATA_KEY};
use crate::context::AuthenticationContext;
use crate::error::AuthenticationFailed;
use crate::resolver::TotpConfigResolver;

/// Builds the absolute enrollment prompt URL for a session.
///
/// ## Errors
///
/// Returns [`AuthenticationFailed`] when the configured server base does
/// not produce a valid URL.
pub fn enable_totp_request_url(
    server: &ServerConfig,
    context: &AuthenticationContext,
) -> Result<Url, AuthenticationFailed> {
    let relative = format!(
        "{ENABLE_TOTP_REQUEST_PAGE}?{SESSION_DATA_KEY}={}&authenticators={AUTHENTICATOR_NAME}&type=totp",
        context.context_identifier()
    );
    Url::parse(&server.server_url(&relative)).map_err(|error| {
        AuthenticationFailed::with_source(
            "Error while building the enableTOTP request page URL",
            error,
        )
    })
}

/// Redirects the attempt to the enrollment prompt page.
///
/// Issues an HTTP 302 pointing at the enrollment page, conditional on
/// the resolved `EnableTOTPInAuthenticationFlow` flag.
///
/// ## Errors
///
/// Returns [`AuthenticationFailed`] when the flag is false (or cannot be
/// resolved) and when the redirect response cannot be built.
pub fn redirect_to_enable_totp_page(
    resolver: &TotpConfigResolver,
    context: &AuthenticationContext,
) -> Result<Response<Body>, AuthenticationFailed> {
    let enabled = resolver.totp_enabled_in_flow(context).map_err(|error| {
        AuthenticationFailed::with_source(
            "Error while getting value for EnableTOTPInAuthenticationFlow",
            error,
        )
    })?;
    if !enabled {
        return Err(AuthenticationFailed::new(
            "Error while getting value for EnableTOTPInAuthenticationFlow",
        ));
    }

    let url = enable_totp_request_url(&resolver.config().server, context)?;
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, url.as_str())
        .body(Body::empty())
        .map_err(|error| {
            AuthenticationFailed::with_source(
                "Error while redirecting the request to get enableTOTP request page",
                error,
            )
        })
}
