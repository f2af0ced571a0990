//! Builders for model fixtures shared by unit and behaviour tests.
//!
//! # Examples
//!
//! ```
//! use marquee::api::models::test_support::{movie, review};
//!
//! let arrival = movie(42, "Arrival", 7.6);
//! assert_eq!(arrival.id.get(), 42);
//!
//! let mine = review(7, "me@example.com", 4.0);
//! assert_eq!(mine.id.get(), 7);
//! ```

use super::{MovieDetail, MovieSummary, Review, User};
use crate::api::ids::{MovieId, ReviewId, UserId};

/// Builds a movie summary with the given id, title and 0–10 vote average.
///
/// # Panics
///
/// Panics when `id` is zero.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture helpers fail fast on bad input")]
pub fn movie(id: u64, title: &str, vote_average: f64) -> MovieSummary {
    MovieSummary {
        id: MovieId::new(id).expect("fixture movie id must be positive"),
        title: title.to_owned(),
        poster_path: Some(format!("/posters/{id}.jpg")),
        backdrop_path: None,
        release_date: Some("2016-11-11".to_owned()),
        vote_average,
    }
}

/// Builds a movie detail without credits or images.
#[must_use]
pub fn movie_detail(id: u64, title: &str, vote_average: f64) -> MovieDetail {
    MovieDetail {
        summary: movie(id, title, vote_average),
        runtime: Some(116),
        overview: Some(format!("{title} overview")),
        genres: vec!["Drama".to_owned()],
        credits: None,
        images: None,
    }
}

/// Builds a user whose nickname is the local part of the email.
///
/// # Panics
///
/// Panics when `id` is zero.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture helpers fail fast on bad input")]
pub fn user(id: u64, email: &str) -> User {
    User {
        id: Some(UserId::new(id).expect("fixture user id must be positive")),
        email: email.to_owned(),
        nickname: email.split('@').next().unwrap_or(email).to_owned(),
        avatar_path: None,
    }
}

/// Builds a review by `email` with the given rating and no text.
///
/// # Panics
///
/// Panics when `id` is zero.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture helpers fail fast on bad input")]
pub fn review(id: u64, email: &str, rating: f64) -> Review {
    Review {
        id: ReviewId::new(id).expect("fixture review id must be positive"),
        user_id: None,
        email: Some(email.to_owned()),
        nickname: email.split('@').next().map(ToOwned::to_owned),
        avatar_path: None,
        movie_id: None,
        movie_title: None,
        poster_path: None,
        rating,
        content: None,
        created_on: None,
    }
}

/// Builds a review of `movie_id` with text content.
#[must_use]
pub fn movie_review(id: u64, movie_id: MovieId, email: &str, rating: f64, content: &str) -> Review {
    Review {
        movie_id: Some(movie_id),
        content: Some(content.to_owned()),
        ..review(id, email, rating)
    }
}
