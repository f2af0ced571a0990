//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.marquee.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `MARQUEE_API_URL`, `MARQUEE_EMAIL`, and so
//!    on for every field
//! 4. **Command-line arguments** – `--api-url`, `--query`/`-q`, ...
//!
//! # Configuration File
//!
//! ```toml
//! api_url = "http://localhost:8080"
//! email = "me@example.com"
//! password = "secret"
//! locale = "ko"
//! detail_route = "tmdb"
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::api::{
    ApiError, Credentials, DetailRoute, GatewayOptions, MovieId, Rating, ReviewRoute, SearchQuery,
    ServiceBase, SignupRequest, UserId,
};
use crate::i18n::Locale;

/// What the binary does for one invocation, in decreasing priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Create an account.
    Signup,
    /// End the session.
    Logout,
    /// Create, update or delete the viewer's review of a movie.
    ReviewMutation,
    /// Follow or unfollow a user.
    Follow,
    /// Upload a new avatar.
    AvatarUpload,
    /// Print one movie's detail screen.
    MovieDetail,
    /// Print one user's profile.
    Profile,
    /// Print search results.
    Search,
    /// Launch the terminal UI.
    Interactive,
    /// Print the home screen lists.
    Home,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use marquee::MarqueeConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = MarqueeConfig::load().expect("failed to load configuration");
/// let base = config.service_base().expect("API URL must be valid");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "MARQUEE",
    discovery(
        dotfile_name = ".marquee.toml",
        config_file_name = "marquee.toml",
        app_name = "marquee"
    )
)]
pub struct MarqueeConfig {
    /// Base URL of the movie service.
    #[ortho_config(cli_short = 'a')]
    pub api_url: String,

    /// Session cookie to replay, e.g. `JSESSIONID=abc123`.
    #[ortho_config()]
    pub session_cookie: Option<String>,

    /// Account email used to sign in.
    #[ortho_config(cli_short = 'e')]
    pub email: Option<String>,

    /// Account password used to sign in.
    #[ortho_config()]
    pub password: Option<String>,

    /// Nickname for `--signup`.
    #[ortho_config()]
    pub nickname: Option<String>,

    /// Title search text.
    #[ortho_config(cli_short = 'q')]
    pub query: Option<String>,

    /// Movie to show or review.
    #[ortho_config(cli_short = 'm')]
    pub movie_id: Option<u64>,

    /// Profile to show, follow or unfollow.
    #[ortho_config(cli_short = 'u')]
    pub user_id: Option<u64>,

    /// Star rating (0.5–5.0) to save for `movie_id`.
    #[ortho_config(cli_short = 'r')]
    pub rating: Option<f64>,

    /// Review text to save with the rating.
    #[ortho_config()]
    pub review: Option<String>,

    /// Deletes the viewer's review of `movie_id` after confirmation.
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so flags are CLI or file only.
    #[ortho_config()]
    pub delete_review: bool,

    /// Skips the delete confirmation prompt.
    #[ortho_config(cli_short = 'y')]
    pub yes: bool,

    /// Follows `user_id`.
    #[ortho_config()]
    pub follow: bool,

    /// Unfollows `user_id`.
    #[ortho_config()]
    pub unfollow: bool,

    /// Image file to upload as the viewer's avatar.
    #[ortho_config()]
    pub avatar: Option<String>,

    /// Creates an account from `email`, `password` and `nickname`.
    #[ortho_config()]
    pub signup: bool,

    /// Ends the current session.
    #[ortho_config()]
    pub logout: bool,

    /// Launches the terminal UI.
    #[ortho_config(cli_short = 'i')]
    pub interactive: bool,

    /// Display language, `en` or `ko`.
    #[ortho_config(cli_short = 'L')]
    pub locale: String,

    /// Detail endpoint flavour, `local` or `tmdb`.
    #[ortho_config()]
    pub detail_route: String,

    /// Review creation endpoint flavour, `query` or `nested`.
    #[ortho_config()]
    pub review_route: String,

    /// Per-request timeout in seconds.
    #[ortho_config()]
    pub request_timeout_seconds: u64,

    /// Writes telemetry events to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: bool,
}

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 15;

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            session_cookie: None,
            email: None,
            password: None,
            nickname: None,
            query: None,
            movie_id: None,
            user_id: None,
            rating: None,
            review: None,
            delete_review: false,
            yes: false,
            follow: false,
            unfollow: false,
            avatar: None,
            signup: false,
            logout: false,
            interactive: false,
            locale: "en".to_owned(),
            detail_route: "local".to_owned(),
            review_route: "query".to_owned(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            telemetry: false,
        }
    }
}

fn configuration(message: impl Into<String>) -> ApiError {
    ApiError::Configuration {
        message: message.into(),
    }
}

impl MarqueeConfig {
    /// Determines the operation mode from the configured fields.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.signup {
            OperationMode::Signup
        } else if self.logout {
            OperationMode::Logout
        } else if self.movie_id.is_some()
            && (self.rating.is_some() || self.review.is_some() || self.delete_review)
        {
            OperationMode::ReviewMutation
        } else if self.follow || self.unfollow {
            OperationMode::Follow
        } else if self.avatar.is_some() {
            OperationMode::AvatarUpload
        } else if self.movie_id.is_some() {
            OperationMode::MovieDetail
        } else if self.user_id.is_some() {
            OperationMode::Profile
        } else if self.query.is_some() {
            OperationMode::Search
        } else if self.interactive {
            OperationMode::Interactive
        } else {
            OperationMode::Home
        }
    }

    /// Checks that the configured fields describe one coherent action.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for conflicting or incomplete
    /// combinations, or for unparseable locale and route settings.
    pub fn validate(&self) -> Result<(), ApiError> {
        self.locale()?;
        self.gateway_options()?;
        if self.follow && self.unfollow {
            return Err(configuration("--follow and --unfollow cannot be combined"));
        }
        if (self.follow || self.unfollow) && self.user_id.is_none() {
            return Err(configuration("following requires --user-id"));
        }
        if self.delete_review && (self.rating.is_some() || self.review.is_some()) {
            return Err(configuration(
                "--delete-review cannot be combined with --rating or --review",
            ));
        }
        if self.movie_id.is_none()
            && (self.rating.is_some() || self.review.is_some() || self.delete_review)
        {
            return Err(configuration("review changes require --movie-id"));
        }
        Ok(())
    }

    /// Parses the service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when `api_url` is not an HTTP(S) URL.
    pub fn service_base(&self) -> Result<ServiceBase, ApiError> {
        ServiceBase::parse(&self.api_url)
    }

    /// Builds the HTTP gateway options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for unknown route names or a zero
    /// timeout.
    pub fn gateway_options(&self) -> Result<GatewayOptions, ApiError> {
        if self.request_timeout_seconds == 0 {
            return Err(configuration("request_timeout_seconds must be positive"));
        }
        Ok(GatewayOptions {
            detail_route: DetailRoute::parse(&self.detail_route)?,
            review_route: ReviewRoute::parse(&self.review_route)?,
            timeout: Duration::from_secs(self.request_timeout_seconds),
            session_cookie: self
                .session_cookie
                .as_deref()
                .map(str::trim)
                .filter(|cookie| !cookie.is_empty())
                .map(ToOwned::to_owned),
        })
    }

    /// Parses the display language.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for anything but `en` or `ko`.
    pub fn locale(&self) -> Result<Locale, ApiError> {
        Locale::parse(&self.locale)
    }

    /// Returns sign-in credentials when both email and password are set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] when either value is blank.
    pub fn credentials(&self) -> Result<Option<Credentials>, ApiError> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) => Credentials::new(email, password).map(Some),
            _ => Ok(None),
        }
    }

    /// Builds the signup request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when email, password or nickname is
    /// missing.
    pub fn signup_request(&self) -> Result<SignupRequest, ApiError> {
        let credentials = self
            .credentials()?
            .ok_or_else(|| configuration("signup requires --email and --password"))?;
        let nickname = self
            .nickname
            .as_deref()
            .ok_or_else(|| configuration("signup requires --nickname"))?;
        SignupRequest::new(credentials, nickname)
    }

    /// Returns the configured movie.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when `movie_id` is unset, or
    /// [`ApiError::InvalidInput`] when it is zero.
    pub fn require_movie_id(&self) -> Result<MovieId, ApiError> {
        let raw = self
            .movie_id
            .ok_or_else(|| configuration("movie id is required (use --movie-id or -m)"))?;
        MovieId::new(raw)
    }

    /// Returns the configured user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when `user_id` is unset, or
    /// [`ApiError::InvalidInput`] when it is zero.
    pub fn require_user_id(&self) -> Result<UserId, ApiError> {
        let raw = self
            .user_id
            .ok_or_else(|| configuration("user id is required (use --user-id or -u)"))?;
        UserId::new(raw)
    }

    /// Returns the search query.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when `query` is unset, or
    /// [`ApiError::InvalidInput`] when it is blank.
    pub fn require_query(&self) -> Result<SearchQuery, ApiError> {
        let text = self
            .query
            .as_deref()
            .ok_or_else(|| configuration("search text is required (use --query or -q)"))?;
        SearchQuery::new(text)
    }

    /// Validates the configured rating, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] when the rating is not a half-star
    /// step between 0.5 and 5.0.
    pub fn review_rating(&self) -> Result<Option<Rating>, ApiError> {
        self.rating
            .map(Rating::from_score)
            .transpose()
            .map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests;
