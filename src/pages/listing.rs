//! Home screen aggregation and the viewer-rating overlay for movie cards.

use std::collections::HashMap;

use tracing::warn;

use super::loadable::Loadable;
use crate::api::{ApiError, Backend, MovieId, MovieListKind, MovieSummary, Review, ReviewGateway};

/// Lists shown on the home screen, in display order.
pub const HOME_SECTIONS: [MovieListKind; 3] = [
    MovieListKind::NowPlaying,
    MovieListKind::BoxOffice,
    MovieListKind::Upcoming,
];

/// Maps each movie the viewer rated to that rating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingLookup {
    ratings: HashMap<MovieId, f64>,
}

/// How a movie card frames its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardScore {
    /// The viewer rated the movie; their stars are shown.
    Rated(f64),
    /// The viewer has not rated it; the vote average on the star scale.
    Average(f64),
}

impl CardScore {
    /// Returns the score on the 0–5 star scale.
    #[must_use]
    pub const fn stars(self) -> f64 {
        match self {
            Self::Rated(stars) | Self::Average(stars) => stars,
        }
    }

    /// Returns true when the score is the viewer's own rating.
    #[must_use]
    pub const fn is_own_rating(self) -> bool {
        matches!(self, Self::Rated(_))
    }
}

impl RatingLookup {
    /// Indexes the viewer's reviews by movie; reviews without a movie are skipped.
    #[must_use]
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let ratings = reviews
            .iter()
            .filter_map(|review| review.movie_id.map(|movie| (movie, review.rating)))
            .collect();
        Self { ratings }
    }

    /// Returns the viewer's rating of `movie`.
    #[must_use]
    pub fn rating_for(&self, movie: MovieId) -> Option<f64> {
        self.ratings.get(&movie).copied()
    }

    /// Chooses between the viewer's rating and the average for a card.
    #[must_use]
    pub fn card_score(&self, movie: &MovieSummary) -> CardScore {
        self.rating_for(movie.id)
            .map_or_else(|| CardScore::Average(movie.average_stars()), CardScore::Rated)
    }

    /// Number of rated movies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Returns true when the viewer has rated nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

/// One home screen section.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSection {
    /// Which list this is.
    pub kind: MovieListKind,
    /// Its movies, or the failure that blanked it.
    pub movies: Loadable<Vec<MovieSummary>>,
}

/// Everything the home screen shows, applied at once after the join.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeBundle {
    /// Sections in [`HOME_SECTIONS`] order.
    pub sections: Vec<ListingSection>,
    /// The viewer's ratings for the card overlay.
    pub ratings: RatingLookup,
}

impl HomeBundle {
    /// Borrows the section for `kind`.
    #[must_use]
    pub fn section(&self, kind: MovieListKind) -> Option<&ListingSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// Returns true when every section failed.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.sections
            .iter()
            .all(|section| section.movies.error().is_some())
    }
}

/// Fetches the viewer's ratings, degrading to an empty overlay on failure.
pub(crate) async fn viewer_ratings(reviews: &dyn ReviewGateway, signed_in: bool) -> RatingLookup {
    if !signed_in {
        return RatingLookup::default();
    }
    match reviews.my_reviews().await {
        Ok(mine) => RatingLookup::from_reviews(&mine),
        Err(error) => {
            warn!(error = %error, "could not load the viewer's ratings; showing averages");
            RatingLookup::default()
        }
    }
}

/// Loads every home section and the rating overlay in parallel.
///
/// One failing list only fails its own section.
pub async fn load_home(backend: Backend<'_>, signed_in: bool) -> HomeBundle {
    let [first, second, third] = HOME_SECTIONS;
    let (now_playing, box_office, upcoming, ratings) = tokio::join!(
        backend.movies.movie_list(first),
        backend.movies.movie_list(second),
        backend.movies.movie_list(third),
        viewer_ratings(backend.reviews, signed_in),
    );
    let sections = [(first, now_playing), (second, box_office), (third, upcoming)]
        .into_iter()
        .map(|(kind, result)| section_from(kind, result))
        .collect();
    HomeBundle { sections, ratings }
}

fn section_from(kind: MovieListKind, result: Result<Vec<MovieSummary>, ApiError>) -> ListingSection {
    if let Err(error) = &result {
        warn!(list = kind.route(), error = %error, "movie list failed to load");
    }
    ListingSection {
        kind,
        movies: Loadable::from_result(result),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{CardScore, RatingLookup, load_home};
    use crate::api::models::test_support::{movie, movie_review};
    use crate::api::{
        ApiError, Backend, MockMovieGateway, MockProfileGateway, MockReviewGateway,
        MockSessionGateway, MockSocialGateway, MovieId, MovieListKind,
    };

    fn movie_id(value: u64) -> MovieId {
        MovieId::new(value).expect("valid movie id")
    }

    #[rstest]
    fn card_prefers_viewer_rating() {
        let lookup = RatingLookup::from_reviews(&[movie_review(
            1,
            movie_id(42),
            "me@example.com",
            4.5,
            "",
        )]);

        assert_eq!(
            lookup.card_score(&movie(42, "Arrival", 7.6)),
            CardScore::Rated(4.5)
        );
        assert_eq!(
            lookup.card_score(&movie(43, "Heat", 8.0)),
            CardScore::Average(4.0)
        );
    }

    #[tokio::test]
    async fn one_failing_list_keeps_the_others() {
        let mut movies = MockMovieGateway::new();
        movies.expect_movie_list().returning(|kind| match kind {
            MovieListKind::BoxOffice => Err(ApiError::Status {
                operation: "load movie list".to_owned(),
                status: 500,
            }),
            _ => Ok(vec![movie(1, "Heat", 8.0)]),
        });
        let mut reviews = MockReviewGateway::new();
        reviews.expect_my_reviews().never();
        let session = MockSessionGateway::new();
        let social = MockSocialGateway::new();
        let profiles = MockProfileGateway::new();
        let backend = Backend {
            session: &session,
            movies: &movies,
            reviews: &reviews,
            social: &social,
            profiles: &profiles,
        };

        let bundle = load_home(backend, false).await;

        let box_office = bundle
            .section(MovieListKind::BoxOffice)
            .expect("box office section");
        assert!(box_office.movies.error().is_some());
        let upcoming = bundle
            .section(MovieListKind::Upcoming)
            .expect("upcoming section");
        assert_eq!(upcoming.movies.loaded().map(Vec::len), Some(1));
        assert!(!bundle.all_failed());
        assert!(bundle.ratings.is_empty());
    }
}
