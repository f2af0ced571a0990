//! reqwest client construction for the HTTP gateway.

use std::sync::Arc;

use reqwest::Client;
use reqwest::cookie::Jar;

use crate::api::error::ApiError;
use crate::api::ids::ServiceBase;

use super::GatewayOptions;

/// Builds a reqwest client that keeps the session cookie between requests.
///
/// When `options` carries a session cookie it is stored for the service's
/// origin before the first request, so an existing browser session can be
/// reused without logging in again.
///
/// # Errors
///
/// Returns `ApiError::Configuration` when reqwest fails to build a client.
pub(super) fn build_http_client(
    base: &ServiceBase,
    options: &GatewayOptions,
) -> Result<Client, ApiError> {
    let jar = Arc::new(Jar::default());
    if let Some(cookie) = options
        .session_cookie
        .as_deref()
        .map(str::trim)
        .filter(|cookie| !cookie.is_empty())
    {
        jar.add_cookie_str(cookie, base.as_url());
    }

    Client::builder()
        .cookie_provider(jar)
        .timeout(options.timeout)
        .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|error| ApiError::Configuration {
            message: format!("build HTTP client failed: {error}"),
        })
}
