//! Title search with the viewer-rating overlay.

use super::listing::{RatingLookup, viewer_ratings};
use crate::api::{ApiError, Backend, MovieSummary, SearchQuery};

/// Results of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    /// The query that produced these results.
    pub query: SearchQuery,
    /// Matching movies in service order.
    pub movies: Vec<MovieSummary>,
    /// The viewer's ratings for the card overlay.
    pub ratings: RatingLookup,
}

impl SearchResults {
    /// Returns true when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Searches and loads the viewer's ratings in parallel.
///
/// # Errors
///
/// Returns the search request's error. A failing ratings request only drops
/// the overlay.
pub async fn search(
    backend: Backend<'_>,
    query: &SearchQuery,
    signed_in: bool,
) -> Result<SearchResults, ApiError> {
    let (movies, ratings) = tokio::join!(
        backend.movies.search_movies(query),
        viewer_ratings(backend.reviews, signed_in),
    );
    Ok(SearchResults {
        query: query.clone(),
        movies: movies?,
        ratings,
    })
}

#[cfg(test)]
mod tests {
    use super::search;
    use crate::api::models::test_support::{movie, movie_review};
    use crate::api::{
        ApiError, Backend, MockMovieGateway, MockProfileGateway, MockReviewGateway,
        MockSessionGateway, MockSocialGateway, MovieId, SearchQuery,
    };

    #[tokio::test]
    async fn overlays_viewer_ratings_on_results() {
        let mut movies = MockMovieGateway::new();
        movies
            .expect_search_movies()
            .withf(|query| query.as_str() == "heat")
            .returning(|_| Ok(vec![movie(7, "Heat", 8.0)]));
        let mut reviews = MockReviewGateway::new();
        reviews.expect_my_reviews().returning(|| {
            Ok(vec![movie_review(
                1,
                MovieId::new(7).expect("valid id"),
                "me@example.com",
                5.0,
                "",
            )])
        });
        let (session, social, profiles) = (
            MockSessionGateway::new(),
            MockSocialGateway::new(),
            MockProfileGateway::new(),
        );
        let backend = Backend {
            session: &session,
            movies: &movies,
            reviews: &reviews,
            social: &social,
            profiles: &profiles,
        };
        let query = SearchQuery::new("heat").expect("valid query");

        let results = search(backend, &query, true)
            .await
            .expect("search should succeed");

        let first = results.movies.first().expect("one result");
        assert!(results.ratings.card_score(first).is_own_rating());
    }

    #[tokio::test]
    async fn ratings_failure_keeps_results() {
        let mut movies = MockMovieGateway::new();
        movies
            .expect_search_movies()
            .returning(|_| Ok(vec![movie(7, "Heat", 8.0)]));
        let mut reviews = MockReviewGateway::new();
        reviews.expect_my_reviews().returning(|| {
            Err(ApiError::Unauthenticated {
                message: "sign in".to_owned(),
            })
        });
        let (session, social, profiles) = (
            MockSessionGateway::new(),
            MockSocialGateway::new(),
            MockProfileGateway::new(),
        );
        let backend = Backend {
            session: &session,
            movies: &movies,
            reviews: &reviews,
            social: &social,
            profiles: &profiles,
        };
        let query = SearchQuery::new("heat").expect("valid query");

        let results = search(backend, &query, true)
            .await
            .expect("search should succeed");

        assert_eq!(results.movies.len(), 1);
        assert!(results.ratings.is_empty());
    }
}
