//! Identifier wrappers and request inputs for the movie service.
//!
//! Identifiers are plain positive integers on the wire. Wrapping them keeps
//! movie, user, and review identifiers from being mixed up at call sites.

use std::fmt;

use serde::Serialize;
use url::Url;

use super::error::ApiError;

macro_rules! positive_identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier, rejecting zero.
            ///
            /// # Errors
            ///
            /// Returns [`ApiError::InvalidInput`] when `value` is zero.
            pub fn new(value: u64) -> Result<Self, ApiError> {
                if value == 0 {
                    return Err(ApiError::InvalidInput {
                        message: format!("{} must be a positive integer", $label),
                    });
                }
                Ok(Self(value))
            }

            /// Parses an identifier from user input such as `"42"`.
            ///
            /// # Errors
            ///
            /// Returns [`ApiError::InvalidInput`] when the text is not a
            /// positive integer.
            pub fn parse(text: &str) -> Result<Self, ApiError> {
                let value = text.trim().parse::<u64>().map_err(|_| ApiError::InvalidInput {
                    message: format!("{} must be a positive integer, got '{}'", $label, text.trim()),
                })?;
                Self::new(value)
            }

            /// Returns the numeric value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

positive_identifier!(
    /// Movie identifier as used in `/api/movies/{id}` routes.
    MovieId,
    "movie id"
);
positive_identifier!(
    /// User identifier as used in profile and follow routes.
    UserId,
    "user id"
);
positive_identifier!(
    /// Review identifier as used in `/api/reviews/{id}` routes.
    ReviewId,
    "review id"
);

/// Base URL of the movie service, normalised to end with a slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBase(Url);

impl ServiceBase {
    /// Parses the configured service URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the text is not an absolute
    /// `http` or `https` URL.
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        let mut url =
            Url::parse(text.trim()).map_err(|error| ApiError::InvalidUrl(error.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self(url))
    }

    /// Joins a service-relative path such as `api/movies/42`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.0
            .join(path.trim_start_matches('/'))
            .map_err(|error| ApiError::InvalidUrl(error.to_string()))
    }

    /// Borrows the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

/// Email and password submitted to the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Validates that both values are present and the email looks plausible.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] for a blank or malformed email or
    /// a blank password.
    pub fn new(email: &str, password: &str) -> Result<Self, ApiError> {
        let trimmed = email.trim();
        if trimmed.is_empty() || !trimmed.contains('@') {
            return Err(ApiError::InvalidInput {
                message: "a valid email address is required".to_owned(),
            });
        }
        if password.is_empty() {
            return Err(ApiError::InvalidInput {
                message: "a password is required".to_owned(),
            });
        }
        Ok(Self {
            email: trimmed.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Borrows the email address.
    #[must_use]
    pub const fn email(&self) -> &str {
        self.email.as_str()
    }
}

/// Signup form: credentials plus the public nickname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    #[serde(flatten)]
    credentials: Credentials,
    nickname: String,
}

impl SignupRequest {
    /// Builds a signup request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] when the nickname is blank.
    pub fn new(credentials: Credentials, nickname: &str) -> Result<Self, ApiError> {
        let trimmed = nickname.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidInput {
                message: "a nickname is required".to_owned(),
            });
        }
        Ok(Self {
            credentials,
            nickname: trimmed.to_owned(),
        })
    }

    /// Borrows the credentials part of the request.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// A non-blank search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trims and validates a search query.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] when the query is blank.
    pub fn new(text: &str) -> Result<Self, ApiError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidInput {
                message: "search query must not be empty".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrows the query text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
