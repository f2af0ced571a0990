//! Error mapping helpers for the reqwest gateway implementation.

use http::StatusCode;

use crate::api::error::ApiError;

const SIGN_IN_REQUIRED: &str = "sign in to continue";

/// Checks if a status indicates the session was missing or refused.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Maps a non-success response into the error taxonomy.
///
/// `resource` names what was addressed and is used for 404 responses;
/// `maybe_message` is the `msg`/`message` field of the body when present.
pub(super) fn map_http_error(
    operation: &str,
    resource: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> ApiError {
    if is_auth_failure(status) {
        return ApiError::Unauthenticated {
            message: maybe_message.unwrap_or_else(|| SIGN_IN_REQUIRED.to_owned()),
        };
    }
    if status == StatusCode::NOT_FOUND {
        return ApiError::NotFound {
            resource: resource.to_owned(),
        };
    }
    match maybe_message {
        Some(message) => ApiError::Rejected {
            status: status.as_u16(),
            message,
        },
        None => ApiError::Status {
            operation: operation.to_owned(),
            status: status.as_u16(),
        },
    }
}

/// Maps a transport or decoding failure reported by reqwest.
pub(super) fn map_reqwest_error(operation: &str, error: &reqwest::Error) -> ApiError {
    if error.is_decode() {
        return ApiError::Decode {
            message: format!("{operation}: {error}"),
        };
    }
    if let Some(status) = error.status() {
        return map_http_error(operation, operation, status, None);
    }
    ApiError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a JSON body that did not match the expected shape.
pub(super) fn map_decode_error(operation: &str, error: &serde_json::Error) -> ApiError {
    ApiError::Decode {
        message: format!("{operation}: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::map_http_error;
    use crate::api::error::ApiError;

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED)]
    #[case(StatusCode::FORBIDDEN)]
    fn auth_statuses_become_unauthenticated(#[case] status: StatusCode) {
        let error = map_http_error("load profile", "user 3", status, None);
        assert!(error.is_unauthenticated(), "unexpected error: {error:?}");
    }

    #[test]
    fn not_found_names_the_resource() {
        let error = map_http_error(
            "load movie",
            "movie 42",
            StatusCode::NOT_FOUND,
            Some("ignored".to_owned()),
        );
        assert_eq!(
            error,
            ApiError::NotFound {
                resource: "movie 42".to_owned()
            }
        );
    }

    #[test]
    fn body_message_becomes_rejection() {
        let error = map_http_error(
            "sign up",
            "account",
            StatusCode::CONFLICT,
            Some("email already registered".to_owned()),
        );
        assert_eq!(
            error,
            ApiError::Rejected {
                status: 409,
                message: "email already registered".to_owned()
            }
        );
    }

    #[test]
    fn bare_status_keeps_operation() {
        let error = map_http_error("follow", "user 3", StatusCode::BAD_GATEWAY, None);
        assert_eq!(
            error,
            ApiError::Status {
                operation: "follow".to_owned(),
                status: 502
            }
        );
    }
}
