//! Serde shapes for the movie service's JSON payloads.
//!
//! Types prefixed with `Api` are deserialisation targets only. Aliases accept
//! both the flat database-row naming (`movieTitle`, `posterPath`) and the
//! TMDB naming (`title`, `poster_path`) so one type covers every endpoint.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::{
    CastMember, CrewMember, Credits, FollowCounts, MovieDetail, MovieImages, MovieSummary, Review,
    User,
};
use crate::api::ids::{MovieId, ReviewId, UserId};

/// Movie list response: either `{ "results": [...] }` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiMovieList {
    Wrapped { results: Vec<ApiMovie> },
    Bare(Vec<ApiMovie>),
}

impl ApiMovieList {
    pub(crate) fn into_movies(self) -> Vec<MovieSummary> {
        let movies = match self {
            Self::Wrapped { results } | Self::Bare(results) => results,
        };
        movies.into_iter().filter_map(ApiMovie::into_summary).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiMovie {
    #[serde(alias = "tmdbId", alias = "movieId")]
    pub(crate) id: u64,
    #[serde(default, alias = "movieTitle", alias = "movieNm")]
    pub(crate) title: Option<String>,
    #[serde(default, alias = "posterPath")]
    pub(crate) poster_path: Option<String>,
    #[serde(default, alias = "backdropPath")]
    pub(crate) backdrop_path: Option<String>,
    #[serde(default, alias = "releaseDate", alias = "openDt")]
    pub(crate) release_date: Option<String>,
    #[serde(default, alias = "voteAverage")]
    pub(crate) vote_average: Option<f64>,
}

impl ApiMovie {
    /// Entries with a zero identifier cannot be opened and are dropped.
    pub(crate) fn into_summary(self) -> Option<MovieSummary> {
        let id = MovieId::new(self.id).ok()?;
        Some(MovieSummary {
            id,
            title: self.title.unwrap_or_default(),
            poster_path: non_blank(self.poster_path),
            backdrop_path: non_blank(self.backdrop_path),
            release_date: non_blank(self.release_date),
            vote_average: self.vote_average.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiMovieDetail {
    #[serde(flatten)]
    pub(crate) movie: ApiMovie,
    #[serde(default)]
    pub(crate) runtime: Option<u32>,
    #[serde(default)]
    pub(crate) overview: Option<String>,
    #[serde(default)]
    pub(crate) genres: Vec<ApiGenre>,
    #[serde(default)]
    pub(crate) credits: Option<ApiCredits>,
    #[serde(default)]
    pub(crate) images: Option<ApiImages>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiGenre {
    pub(crate) name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiCredits {
    #[serde(default)]
    pub(crate) cast: Vec<ApiCastMember>,
    #[serde(default)]
    pub(crate) crew: Vec<ApiCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCastMember {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) character: Option<String>,
    #[serde(default, alias = "profilePath")]
    pub(crate) profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCrewMember {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) job: Option<String>,
    #[serde(default, alias = "profilePath")]
    pub(crate) profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiImages {
    #[serde(default)]
    pub(crate) backdrops: Vec<ApiImage>,
    #[serde(default)]
    pub(crate) posters: Vec<ApiImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiImage {
    #[serde(alias = "file_Path", alias = "filePath")]
    pub(crate) file_path: String,
}

impl ApiMovieDetail {
    /// Converts into the detail model; `None` when the identifier is zero.
    pub(crate) fn into_detail(self) -> Option<MovieDetail> {
        let summary = self.movie.into_summary()?;
        Some(MovieDetail {
            summary,
            runtime: self.runtime.filter(|minutes| *minutes > 0),
            overview: non_blank(self.overview),
            genres: self.genres.into_iter().map(|genre| genre.name).collect(),
            credits: self.credits.map(Credits::from),
            images: self.images.map(MovieImages::from),
        })
    }
}

impl From<ApiCredits> for Credits {
    fn from(value: ApiCredits) -> Self {
        Self {
            cast: value
                .cast
                .into_iter()
                .map(|member| CastMember {
                    name: member.name,
                    character: non_blank(member.character),
                    profile_path: non_blank(member.profile_path),
                })
                .collect(),
            crew: value
                .crew
                .into_iter()
                .map(|member| CrewMember {
                    name: member.name,
                    job: non_blank(member.job),
                    profile_path: non_blank(member.profile_path),
                })
                .collect(),
        }
    }
}

impl From<ApiImages> for MovieImages {
    fn from(value: ApiImages) -> Self {
        let paths = |images: Vec<ApiImage>| -> Vec<String> {
            images
                .into_iter()
                .map(|image| image.file_path)
                .filter(|path| !path.trim().is_empty())
                .collect()
        };
        Self {
            backdrops: paths(value.backdrops),
            posters: paths(value.posters),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    #[serde(default, alias = "userId")]
    pub(crate) id: Option<u64>,
    #[serde(default)]
    pub(crate) email: Option<String>,
    #[serde(default)]
    pub(crate) nickname: Option<String>,
    #[serde(default, alias = "profileImg", alias = "profileImage")]
    pub(crate) avatar_path: Option<String>,
}

impl From<ApiUser> for User {
    fn from(value: ApiUser) -> Self {
        Self {
            id: value.id.and_then(|id| UserId::new(id).ok()),
            email: value.email.unwrap_or_default(),
            nickname: value.nickname.unwrap_or_default(),
            avatar_path: non_blank(value.avatar_path),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiReview {
    #[serde(alias = "id")]
    pub(crate) review_id: u64,
    #[serde(default)]
    pub(crate) user_id: Option<u64>,
    #[serde(default)]
    pub(crate) email: Option<String>,
    #[serde(default)]
    pub(crate) nickname: Option<String>,
    #[serde(default)]
    pub(crate) profile_img: Option<String>,
    #[serde(default, alias = "tmdbId")]
    pub(crate) movie_id: Option<u64>,
    #[serde(default, alias = "title")]
    pub(crate) movie_title: Option<String>,
    #[serde(default, alias = "poster_path")]
    pub(crate) poster_path: Option<String>,
    #[serde(default)]
    pub(crate) rating: Option<f64>,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default, alias = "regDt", alias = "createdDate")]
    pub(crate) created_at: Option<String>,
}

impl ApiReview {
    /// Converts into the review model; `None` when the identifier is zero.
    pub(crate) fn into_review(self) -> Option<Review> {
        let id = ReviewId::new(self.review_id).ok()?;
        Some(Review {
            id,
            user_id: self.user_id.and_then(|user| UserId::new(user).ok()),
            email: non_blank(self.email),
            nickname: non_blank(self.nickname),
            avatar_path: non_blank(self.profile_img),
            movie_id: self.movie_id.and_then(|movie| MovieId::new(movie).ok()),
            movie_title: non_blank(self.movie_title),
            poster_path: non_blank(self.poster_path),
            rating: self.rating.unwrap_or_default(),
            content: self.content,
            created_on: self.created_at.as_deref().and_then(parse_day),
        })
    }
}

pub(crate) fn into_reviews(reviews: Vec<ApiReview>) -> Vec<Review> {
    reviews
        .into_iter()
        .filter_map(ApiReview::into_review)
        .collect()
}

/// Ratings calendar: `{ "YYYY-MM-DD": [review, ...] }`.
pub(crate) type ApiCalendar = BTreeMap<String, Vec<ApiReview>>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiFollowCounts {
    #[serde(default)]
    pub(crate) follower_count: Option<u64>,
    #[serde(default)]
    pub(crate) following_count: Option<u64>,
}

impl From<ApiFollowCounts> for FollowCounts {
    fn from(value: ApiFollowCounts) -> Self {
        Self {
            followers: value.follower_count.unwrap_or_default(),
            following: value.following_count.unwrap_or_default(),
        }
    }
}

/// `is-following` response: an object with `isFollowing` or a bare boolean.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiFollowState {
    Wrapped {
        #[serde(rename = "isFollowing", default)]
        is_following: Option<bool>,
    },
    Bare(bool),
}

impl ApiFollowState {
    pub(crate) fn is_following(&self) -> bool {
        match self {
            Self::Wrapped { is_following } => is_following.unwrap_or(false),
            Self::Bare(flag) => *flag,
        }
    }
}

/// Message body used by signup, login and error responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiMessage {
    #[serde(default)]
    pub(crate) msg: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

impl ApiMessage {
    pub(crate) fn text(self) -> Option<String> {
        non_blank(self.msg).or_else(|| non_blank(self.message))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Accepts `YYYY-MM-DD` or an ISO-8601 timestamp and keeps the day.
pub(crate) fn parse_day(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|timestamp| timestamp.date())
        })
        .or_else(|| {
            trimmed
                .get(..10)
                .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ApiFollowState, ApiMovieDetail, ApiMovieList, ApiReview, parse_day};

    #[test]
    fn movie_list_accepts_wrapped_and_bare_shapes() {
        let wrapped: ApiMovieList = serde_json::from_value(serde_json::json!({
            "results": [{ "id": 1, "title": "Alien", "vote_average": 8.4 }]
        }))
        .expect("wrapped list should decode");
        let bare: ApiMovieList = serde_json::from_value(serde_json::json!([
            { "tmdbId": 1, "movieTitle": "Alien", "voteAverage": 8.4 }
        ]))
        .expect("bare list should decode");

        assert_eq!(wrapped.into_movies(), bare.into_movies());
    }

    #[test]
    fn movie_list_drops_zero_identifiers() {
        let list: ApiMovieList = serde_json::from_value(serde_json::json!([
            { "id": 0, "title": "Ghost" },
            { "id": 2, "title": "Heat" }
        ]))
        .expect("list should decode");

        let movies = list.into_movies();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies.first().map(|movie| movie.title.as_str()), Some("Heat"));
    }

    #[test]
    fn detail_decodes_tmdb_credits_and_image_typo() {
        let payload: ApiMovieDetail = serde_json::from_value(serde_json::json!({
            "id": 42,
            "title": "Arrival",
            "runtime": 116,
            "genres": [{ "name": "Drama" }],
            "credits": {
                "cast": [{ "name": "Amy Adams", "character": "Louise" }],
                "crew": [{ "name": "Denis Villeneuve", "job": "Director" }]
            },
            "images": { "backdrops": [], "posters": [{ "file_Path": "/p.jpg" }] }
        }))
        .expect("detail should decode");

        let detail = payload.into_detail().expect("non-zero id");
        assert_eq!(detail.genres, vec!["Drama".to_owned()]);
        assert_eq!(
            detail.director().map(|member| member.name.as_str()),
            Some("Denis Villeneuve")
        );
        assert_eq!(detail.gallery(), ["/p.jpg".to_owned()]);
    }

    #[test]
    fn review_reads_backend_row() {
        let payload: ApiReview = serde_json::from_value(serde_json::json!({
            "reviewId": 7,
            "userId": 3,
            "email": "me@example.com",
            "nickname": "me",
            "movieId": 42,
            "rating": 4.0,
            "content": "ok"
        }))
        .expect("review should decode");

        let review = payload.into_review().expect("non-zero id");
        assert_eq!(review.id.get(), 7);
        assert_eq!(review.movie_id.map(crate::api::MovieId::get), Some(42));
        assert_eq!(review.text(), Some("ok"));
    }

    #[rstest]
    #[case(serde_json::json!({ "isFollowing": true }), true)]
    #[case(serde_json::json!({}), false)]
    #[case(serde_json::json!(true), true)]
    fn follow_state_shapes(#[case] body: serde_json::Value, #[case] expected: bool) {
        let state: ApiFollowState = serde_json::from_value(body).expect("state should decode");
        assert_eq!(state.is_following(), expected);
    }

    #[rstest]
    #[case("2024-05-01", Some((2024, 5, 1)))]
    #[case("2024-05-01T10:15:00", Some((2024, 5, 1)))]
    #[case("2024-05-01T10:15:00.123Z", Some((2024, 5, 1)))]
    #[case("May 1st", None)]
    fn parses_review_days(#[case] text: &str, #[case] ymd: Option<(i32, u32, u32)>) {
        let expected =
            ymd.and_then(|(year, month, day)| chrono::NaiveDate::from_ymd_opt(year, month, day));
        assert_eq!(parse_day(text), expected);
    }
}
