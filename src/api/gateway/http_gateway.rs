//! reqwest-backed gateway implementing every service area.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::api::error::ApiError;
use crate::api::ids::ServiceBase;

use super::client::build_http_client;
use super::error_mapping::map_reqwest_error;
use super::http_utils::{decode_json, expect_success};
use super::{GatewayOptions, ReviewRoute};

/// HTTP gateway for the movie service.
///
/// The client owns the cookie store, so a session established by
/// [`login`](super::SessionGateway::login) is replayed on later requests made
/// through the same gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: ServiceBase,
    options: GatewayOptions,
}

impl HttpGateway {
    /// Creates a gateway for the service at `base`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` when the HTTP client cannot be built.
    pub fn new(base: ServiceBase, options: GatewayOptions) -> Result<Self, ApiError> {
        let client = build_http_client(&base, &options)?;
        Ok(Self {
            client,
            base,
            options,
        })
    }

    /// Borrows the service base URL.
    #[must_use]
    pub const fn base(&self) -> &ServiceBase {
        &self.base
    }

    /// Borrows the connection options.
    #[must_use]
    pub const fn options(&self) -> &GatewayOptions {
        &self.options
    }

    pub(super) const fn review_route(&self) -> ReviewRoute {
        self.options.review_route
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.endpoint(path)
    }

    pub(super) fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    pub(super) fn post(&self, url: Url) -> RequestBuilder {
        self.client.post(url)
    }

    pub(super) fn put(&self, url: Url) -> RequestBuilder {
        self.client.put(url)
    }

    pub(super) fn delete(&self, url: Url) -> RequestBuilder {
        self.client.delete(url)
    }

    /// Sends a request, mapping transport failures.
    pub(super) async fn send(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|error| map_reqwest_error(operation, &error))?;
        debug!(
            operation,
            status = response.status().as_u16(),
            url = %response.url(),
            "movie service responded"
        );
        Ok(response)
    }

    /// Sends a GET request and decodes the JSON body.
    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        resource: &str,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.send(operation, self.get(url)).await?;
        decode_json(operation, resource, response).await
    }

    /// Sends a request whose response body is ignored.
    pub(super) async fn send_expecting_success(
        &self,
        operation: &str,
        resource: &str,
        request: RequestBuilder,
    ) -> Result<(), ApiError> {
        let response = self.send(operation, request).await?;
        expect_success(operation, resource, response).await
    }
}
