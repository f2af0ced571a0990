//! Data models for movies, reviews, users, and the follow graph.
//!
//! Public types are what the rest of the crate works with. The `wire`
//! submodule holds the serde shapes the service actually sends, which vary
//! between endpoints (flat database rows versus nested TMDB payloads), and
//! converts them into these types.

use chrono::NaiveDate;
use serde::Serialize;

use super::ids::{MovieId, ReviewId, UserId};
use super::rating::Rating;

mod calendar;
pub(crate) mod wire;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use calendar::{CalendarDay, CalendarIndex};

/// Number of cast members shown on the detail screen.
pub const LEADING_CAST_LIMIT: usize = 10;

/// A signed-up user as returned by `/api/me`, `/api/user/{id}`, and the
/// follow lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User identifier, absent in some legacy payloads.
    pub id: Option<UserId>,
    /// Email address, used by the service as the session principal.
    pub email: String,
    /// Public nickname.
    pub nickname: String,
    /// Avatar image path, if the user uploaded one.
    pub avatar_path: Option<String>,
}

impl User {
    /// Returns the nickname, falling back to the email when blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.nickname.trim().is_empty() {
            self.email.as_str()
        } else {
            self.nickname.as_str()
        }
    }

    /// Returns true when both records describe the same account.
    ///
    /// Identifiers are compared when both are known; otherwise the email,
    /// which the service treats as the unique principal, decides.
    #[must_use]
    pub fn is_same_account(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            _ => !self.email.is_empty() && self.email.eq_ignore_ascii_case(&other.email),
        }
    }
}

/// Which movie list endpoint to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieListKind {
    /// `/api/movies/now-playing`
    NowPlaying,
    /// `/api/movies/popular`
    Popular,
    /// `/api/movies/box-office`
    BoxOffice,
    /// `/api/movies/upcoming`
    Upcoming,
}

impl MovieListKind {
    /// Returns the route segment below `/api/movies/`.
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::NowPlaying => "now-playing",
            Self::Popular => "popular",
            Self::BoxOffice => "box-office",
            Self::Upcoming => "upcoming",
        }
    }
}

/// Movie fields shared by list entries and the detail payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    /// Movie identifier.
    pub id: MovieId,
    /// Display title.
    pub title: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Release date as sent by the service (`YYYY-MM-DD`).
    pub release_date: Option<String>,
    /// Vote average on the service's 0–10 scale.
    pub vote_average: f64,
}

impl MovieSummary {
    /// Converts the 0–10 vote average to the 0–5 star scale.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the star scale is half the vote scale"
    )]
    pub fn average_stars(&self) -> f64 {
        (self.vote_average / 2.0).clamp(0.0, f64::from(super::rating::MAX_STARS))
    }

    /// Returns the four-digit release year, if the release date has one.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|character| character.is_ascii_digit()))
    }
}

/// One credited cast member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    /// Performer name.
    pub name: String,
    /// Character played.
    pub character: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
}

/// One credited crew member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewMember {
    /// Crew member name.
    pub name: String,
    /// Job title such as `Director`.
    pub job: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
}

/// Cast and crew credits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credits {
    /// Cast in billing order.
    pub cast: Vec<CastMember>,
    /// Crew in service order.
    pub crew: Vec<CrewMember>,
}

/// Image paths attached to a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieImages {
    /// Backdrop stills.
    pub backdrops: Vec<String>,
    /// Alternative posters.
    pub posters: Vec<String>,
}

/// Full movie payload for the detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    /// Fields shared with list entries.
    pub summary: MovieSummary,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Plot overview.
    pub overview: Option<String>,
    /// Genre names.
    pub genres: Vec<String>,
    /// Credits, when the service embeds them.
    pub credits: Option<Credits>,
    /// Images, when the service embeds them.
    pub images: Option<MovieImages>,
}

impl MovieDetail {
    /// Returns the first crew member credited as director.
    #[must_use]
    pub fn director(&self) -> Option<&CrewMember> {
        self.credits
            .as_ref()?
            .crew
            .iter()
            .find(|member| member.job.as_deref() == Some("Director"))
    }

    /// Returns up to [`LEADING_CAST_LIMIT`] cast members in billing order.
    #[must_use]
    pub fn leading_cast(&self) -> &[CastMember] {
        let Some(credits) = self.credits.as_ref() else {
            return &[];
        };
        let end = credits.cast.len().min(LEADING_CAST_LIMIT);
        credits.cast.get(..end).unwrap_or(&[])
    }

    /// Returns the still gallery: backdrops, or posters when there are none.
    #[must_use]
    pub fn gallery(&self) -> &[String] {
        match &self.images {
            Some(images) if !images.backdrops.is_empty() => images.backdrops.as_slice(),
            Some(images) => images.posters.as_slice(),
            None => &[],
        }
    }
}

/// A user's review of a movie.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Review identifier.
    pub id: ReviewId,
    /// Author's user identifier.
    pub user_id: Option<UserId>,
    /// Author's email, the field the service uses as the owner key.
    pub email: Option<String>,
    /// Author's nickname.
    pub nickname: Option<String>,
    /// Author's avatar path.
    pub avatar_path: Option<String>,
    /// Reviewed movie.
    pub movie_id: Option<MovieId>,
    /// Reviewed movie title, present on profile listings.
    pub movie_title: Option<String>,
    /// Reviewed movie poster, present on profile listings.
    pub poster_path: Option<String>,
    /// Star rating (0–5).
    pub rating: f64,
    /// Free-text review, possibly empty.
    pub content: Option<String>,
    /// Day the review was written.
    pub created_on: Option<NaiveDate>,
}

impl Review {
    /// Returns true when `viewer` wrote this review.
    #[must_use]
    pub fn is_written_by(&self, viewer: &User) -> bool {
        self.email
            .as_deref()
            .is_some_and(|email| !email.is_empty() && email.eq_ignore_ascii_case(&viewer.email))
    }

    /// Returns the author's display name.
    #[must_use]
    pub fn author_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|nickname| !nickname.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("anonymous")
    }

    /// Returns the review text, treating blank content as absent.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content
            .as_deref()
            .map(str::trim)
            .filter(|content| !content.is_empty())
    }
}

/// Follower and followee totals for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowCounts {
    /// Users following this user.
    pub followers: u64,
    /// Users this user follows.
    pub following: u64,
}

/// Body sent to create or update a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRequest {
    /// Star rating.
    pub rating: Rating,
    /// Review text; empty when the user only rated.
    pub content: String,
}

/// An avatar image ready for multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    /// File name reported in the multipart part.
    pub file_name: String,
    /// MIME type of the image.
    pub mime_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}
