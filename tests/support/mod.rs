//! Shared test utilities.

pub mod runtime;

use marquee::api::{GatewayOptions, HttpGateway, ServiceBase};
use rstest_bdd::Slot;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use self::runtime::SharedRuntime;

/// Error type returned by behavioural steps.
pub type StepError = Box<dyn std::error::Error>;

/// Mounts `mock` on the scenario's server.
///
/// # Errors
///
/// Returns an error if the server slot is empty.
pub fn mount(
    runtime: &SharedRuntime,
    server: &Slot<MockServer>,
    mock: Mock,
) -> Result<(), StepError> {
    server
        .with_ref(|mock_server| runtime.block_on(mock.mount(mock_server)))
        .ok_or_else(|| "mock server not initialised".into())
}

/// Answers the identity request with `email`, or 401 when `None`.
///
/// # Errors
///
/// Returns an error if the server slot is empty.
pub fn mount_identity(
    runtime: &SharedRuntime,
    server: &Slot<MockServer>,
    email: Option<&str>,
) -> Result<(), StepError> {
    let response = match email {
        Some(address) => ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "email": address,
            "nickname": "me"
        })),
        None => ResponseTemplate::new(401),
    };
    mount(
        runtime,
        server,
        Mock::given(method("GET"))
            .and(path("/api/me"))
            .respond_with(response),
    )
}

/// Builds a gateway pointed at the scenario's server.
///
/// # Errors
///
/// Returns an error if the server slot is empty or the gateway cannot be
/// built.
pub fn gateway_for(server: &Slot<MockServer>) -> Result<HttpGateway, StepError> {
    let uri = server
        .with_ref(MockServer::uri)
        .ok_or("mock server not initialised")?;
    let base = ServiceBase::parse(&uri)?;
    Ok(HttpGateway::new(base, GatewayOptions::default())?)
}
