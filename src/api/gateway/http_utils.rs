//! Shared response helpers for gateway implementations.

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::api::models::wire::ApiMessage;

use super::error_mapping::{map_decode_error, map_http_error, map_reqwest_error};

/// Pulls the `msg` or `message` field out of a JSON error body.
pub(super) fn extract_service_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiMessage>(body)
        .ok()
        .and_then(ApiMessage::text)
}

/// Returns the body text of a successful response, or the mapped error.
pub(super) async fn read_success_body(
    operation: &str,
    resource: &str,
    response: Response,
) -> Result<String, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|error| map_reqwest_error(operation, &error))?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(map_http_error(
            operation,
            resource,
            status,
            extract_service_message(&body),
        ))
    }
}

/// Decodes the JSON body of a successful response.
pub(super) async fn decode_json<T: DeserializeOwned>(
    operation: &str,
    resource: &str,
    response: Response,
) -> Result<T, ApiError> {
    let body = read_success_body(operation, resource, response).await?;
    serde_json::from_str(&body).map_err(|error| map_decode_error(operation, &error))
}

/// Checks that a response succeeded, discarding any body.
pub(super) async fn expect_success(
    operation: &str,
    resource: &str,
    response: Response,
) -> Result<(), ApiError> {
    read_success_body(operation, resource, response)
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::extract_service_message;

    #[rstest]
    #[case(r#"{"msg":"already registered"}"#, Some("already registered"))]
    #[case(r#"{"message":"bad rating"}"#, Some("bad rating"))]
    #[case(r#"{"msg":"  ","message":"fallback"}"#, Some("fallback"))]
    #[case("<html>oops</html>", None)]
    #[case("", None)]
    fn extracts_message_fields(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_service_message(body).as_deref(), expected);
    }
}
