//! Error types exposed by the movie service client layer.

use thiserror::Error;

/// Errors surfaced while validating input or talking to the movie service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The configured service URL could not be parsed or joined.
    #[error("service URL is invalid: {0}")]
    InvalidUrl(String),

    /// The request needs a signed-in session and none was accepted.
    #[error("sign-in required: {message}")]
    Unauthenticated {
        /// Message returned with the 401/403 response, or a fallback.
        message: String,
    },

    /// The addressed resource does not exist.
    #[error("{resource} was not found")]
    NotFound {
        /// Human-readable description of what was requested.
        resource: String,
    },

    /// The service declined the request with an explanatory message.
    #[error("the service rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code of the response.
        status: u16,
        /// `msg` or `message` field from the response body.
        message: String,
    },

    /// The service answered with a non-success status and no message.
    #[error("{operation} failed with HTTP status {status}")]
    Status {
        /// Operation that was being performed.
        operation: String,
        /// HTTP status code of the response.
        status: u16,
    },

    /// Networking failed before a response arrived.
    #[error("network error talking to the movie service: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A response arrived but its body did not match the expected shape.
    #[error("unexpected response from the movie service: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// Input was rejected locally before any request was issued.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the rejected value.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl ApiError {
    /// Returns true when the service reported that the resource is missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true when the service refused the request for lack of a session.
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }
}
