//! Typed client for the movie discovery and review service.
//!
//! This module parses identifiers and user input, validates ratings, and
//! wraps the service's HTTP API behind gateway traits. Responses are decoded
//! from whichever payload shape the endpoint sends and mapped into a single
//! error type so callers can report failures without touching reqwest.

pub mod error;
pub mod gateway;
pub mod ids;
pub mod models;
pub mod rating;

pub use error::ApiError;
pub use gateway::{
    Backend, DetailRoute, GatewayOptions, HttpGateway, MovieGateway, ProfileGateway,
    ReviewGateway, ReviewRoute, SessionGateway, SocialGateway,
};
pub use ids::{Credentials, MovieId, ReviewId, SearchQuery, ServiceBase, SignupRequest, UserId};
pub use models::{
    AvatarUpload, CalendarDay, CalendarIndex, FollowCounts, MovieDetail, MovieListKind,
    MovieSummary, Review, ReviewRequest, User,
};
pub use rating::{MAX_STARS, Rating, RatingError};

#[cfg(test)]
pub use gateway::{
    MockMovieGateway, MockProfileGateway, MockReviewGateway, MockSessionGateway,
    MockSocialGateway,
};
