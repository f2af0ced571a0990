//! Gateways for talking to the movie service.
//!
//! Each trait covers one area of the HTTP API so pages depend only on what
//! they call. The traits are mocked in unit tests while [`HttpGateway`]
//! implements all of them over reqwest for real requests.

mod client;
mod error_mapping;
mod http_gateway;
mod http_utils;
mod movies;
mod profile;
mod reviews;
mod session;
mod social;


pub use http_gateway::HttpGateway;

use std::time::Duration;

use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::ids::{Credentials, MovieId, ReviewId, SearchQuery, SignupRequest, UserId};
use crate::api::models::{
    AvatarUpload, CalendarIndex, FollowCounts, MovieDetail, MovieListKind, MovieSummary, Review,
    ReviewRequest, User,
};

/// Session endpoints: identity, login, signup and logout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Resolves the signed-in user, or `None` when the session is anonymous.
    async fn current_user(&self) -> Result<Option<User>, ApiError>;

    /// Signs in and returns the account the session now belongs to.
    async fn login(&self, credentials: &Credentials) -> Result<User, ApiError>;

    /// Creates an account and returns the service's confirmation message.
    async fn signup(&self, request: &SignupRequest) -> Result<String, ApiError>;

    /// Ends the current session.
    async fn logout(&self) -> Result<(), ApiError>;
}

/// Movie catalogue endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieGateway: Send + Sync {
    /// Fetch one of the curated movie lists.
    async fn movie_list(&self, kind: MovieListKind) -> Result<Vec<MovieSummary>, ApiError>;

    /// Search movies by title.
    async fn search_movies(&self, query: &SearchQuery) -> Result<Vec<MovieSummary>, ApiError>;

    /// Fetch the full detail payload for one movie.
    async fn movie_detail(&self, movie: MovieId) -> Result<MovieDetail, ApiError>;
}

/// Review endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Fetch every review written for a movie.
    async fn movie_reviews(&self, movie: MovieId) -> Result<Vec<Review>, ApiError>;

    /// Fetch the signed-in user's own reviews.
    async fn my_reviews(&self) -> Result<Vec<Review>, ApiError>;

    /// Create the signed-in user's review of a movie.
    async fn create_review(&self, movie: MovieId, request: &ReviewRequest)
    -> Result<(), ApiError>;

    /// Replace an existing review.
    async fn update_review(&self, review: ReviewId, request: &ReviewRequest)
    -> Result<(), ApiError>;

    /// Delete a review.
    async fn delete_review(&self, review: ReviewId) -> Result<(), ApiError>;
}

/// Follow graph endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGateway: Send + Sync {
    /// Fetch follower and followee totals.
    async fn follow_counts(&self, user: UserId) -> Result<FollowCounts, ApiError>;

    /// Returns true when the signed-in user follows `user`.
    async fn is_following(&self, user: UserId) -> Result<bool, ApiError>;

    /// List the users following `user`.
    async fn followers(&self, user: UserId) -> Result<Vec<User>, ApiError>;

    /// List the users `user` follows.
    async fn following(&self, user: UserId) -> Result<Vec<User>, ApiError>;

    /// Follow `user` as the signed-in user.
    async fn follow(&self, user: UserId) -> Result<(), ApiError>;

    /// Stop following `user`.
    async fn unfollow(&self, user: UserId) -> Result<(), ApiError>;
}

/// Profile endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Fetch a user's public identity.
    async fn user(&self, user: UserId) -> Result<User, ApiError>;

    /// Fetch the movies a user has rated, newest first as the service orders them.
    async fn user_reviews(&self, user: UserId) -> Result<Vec<Review>, ApiError>;

    /// Fetch a user's date-keyed ratings calendar.
    async fn ratings_calendar(&self, user: UserId) -> Result<CalendarIndex, ApiError>;

    /// Upload a new avatar image for `user`.
    async fn upload_avatar(&self, user: UserId, upload: &AvatarUpload) -> Result<(), ApiError>;
}

/// Borrowed set of gateways handed to page loaders.
///
/// Holding each area separately lets tests substitute one mock per trait.
#[derive(Clone, Copy)]
pub struct Backend<'a> {
    /// Session endpoints.
    pub session: &'a dyn SessionGateway,
    /// Movie catalogue endpoints.
    pub movies: &'a dyn MovieGateway,
    /// Review endpoints.
    pub reviews: &'a dyn ReviewGateway,
    /// Follow graph endpoints.
    pub social: &'a dyn SocialGateway,
    /// Profile endpoints.
    pub profiles: &'a dyn ProfileGateway,
}

impl<'a> Backend<'a> {
    /// Uses one gateway that implements every area.
    #[must_use]
    pub fn from_gateway<G>(gateway: &'a G) -> Self
    where
        G: SessionGateway + MovieGateway + ReviewGateway + SocialGateway + ProfileGateway,
    {
        Self {
            session: gateway,
            movies: gateway,
            reviews: gateway,
            social: gateway,
            profiles: gateway,
        }
    }
}

/// Which route serves the movie detail payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailRoute {
    /// `GET /api/movies/{id}`
    #[default]
    Local,
    /// `GET /api/movies/tmdb/{id}`
    Tmdb,
}

impl DetailRoute {
    /// Parses `local` or `tmdb`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for any other value.
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "tmdb" => Ok(Self::Tmdb),
            other => Err(ApiError::Configuration {
                message: format!("unknown detail route '{other}' (expected local or tmdb)"),
            }),
        }
    }

    pub(crate) fn path(self, movie: MovieId) -> String {
        match self {
            Self::Local => format!("api/movies/{movie}"),
            Self::Tmdb => format!("api/movies/tmdb/{movie}"),
        }
    }
}

/// Which route creates a review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewRoute {
    /// `POST /api/reviews?tmdbId={id}`
    #[default]
    Query,
    /// `POST /api/movies/{id}/reviews`
    Nested,
}

impl ReviewRoute {
    /// Parses `query` or `nested`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for any other value.
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "query" => Ok(Self::Query),
            "nested" => Ok(Self::Nested),
            other => Err(ApiError::Configuration {
                message: format!("unknown review route '{other}' (expected query or nested)"),
            }),
        }
    }
}

/// Connection settings for [`HttpGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOptions {
    /// Detail route flavour.
    pub detail_route: DetailRoute,
    /// Review creation route flavour.
    pub review_route: ReviewRoute,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Cookie (e.g. `JSESSIONID=...`) to seed the session with.
    pub session_cookie: Option<String>,
}

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            detail_route: DetailRoute::default(),
            review_route: ReviewRoute::default(),
            timeout: DEFAULT_TIMEOUT,
            session_cookie: None,
        }
    }
}
